use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod pair;
pub mod pipeline;
pub mod pool;
pub mod reserves;
pub mod state;

use instructions::*;
use pipeline::task2::Task2Quote;

declare_id!("CNnHSdADeHPxYWRDuhWrjHWt3e2yQde6XGTyfa5AhrBF");

#[program]
pub mod swapper {
    use super::*;

    /// Fix the pool factory and wrapped-native mint for this router
    pub fn initialize(
        ctx: Context<Initialize>,
        factory: Pubkey,
        wrapped_native: Pubkey,
    ) -> Result<()> {
        instructions::initialize::process(ctx, factory, wrapped_native)
    }

    /// Derive the pool address for two mints
    pub fn pair_for(
        ctx: Context<PairFor>,
        factory: Pubkey,
        token_a: Pubkey,
        token_b: Pubkey,
    ) -> Result<Pubkey> {
        instructions::quote::locate_pair(ctx, factory, token_a, token_b)
    }

    /// Native currency needed to buy exactly `amount_out` of the output token
    pub fn get_task1_amount_in(ctx: Context<QuotePool>, amount_out: u64) -> Result<u64> {
        instructions::quote::quote_task1(ctx, amount_out)
    }

    /// Exact-output swap paid with native currency; excess value is refunded
    pub fn task1_swap(
        ctx: Context<ExecuteRoute>,
        amount_out: u64,
        value: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::execute_route::execute_task1(ctx, amount_out, value, deadline)
    }

    /// Native currency needed for the swap leg and the liquidity leg of a zap
    pub fn get_task2_amounts_in(ctx: Context<QuotePool>, amount_out: u64) -> Result<Task2Quote> {
        instructions::quote::quote_task2(ctx, amount_out)
    }

    /// Swap into the output token and deposit it with matching native currency
    pub fn task2_swap_and_add_liquidity(
        ctx: Context<ExecuteRoute>,
        amount_out: u64,
        value: u64,
        deadline: i64,
    ) -> Result<()> {
        instructions::execute_route::execute_task2(ctx, amount_out, value, deadline)
    }
}
