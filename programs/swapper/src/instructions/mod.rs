pub mod execute_route;
pub mod gateway;
pub mod initialize;
pub mod quote;

pub use execute_route::*;
pub use initialize::*;
pub use quote::*;

/// Seed of the router configuration PDA
pub const CONFIG_SEED: &[u8] = b"swapper_config";

/// Seed of the PDA that holds escrow accounts during a pipeline
pub const ROUTER_AUTHORITY_SEED: &[u8] = b"router_authority";
