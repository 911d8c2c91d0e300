//! Quote-then-execute pipelines shared by both router instructions.
//!
//! A pipeline runs strictly forward through [`Stage`]s. All side effects go
//! through a [`PoolGateway`]; the program implements it with CPIs into the
//! pool, token and system programs.

use crate::errors::SwapperError;
use crate::reserves::ReserveSource;
use anchor_lang::prelude::*;

#[cfg(test)]
pub(crate) mod simulated;
pub mod task1;
pub mod task2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Quoting,
    Swapping,
    Depositing,
    Refunding,
    Done,
}

#[derive(Debug)]
pub struct Pipeline {
    stage: Stage,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            stage: Stage::Quoting,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Stages may be skipped but never revisited.
    pub fn advance(&mut self, next: Stage) -> Result<()> {
        require!(next > self.stage, SwapperError::InvalidStageTransition);
        self.stage = next;
        Ok(())
    }
}

/// A deadline equal to the current time is still valid.
pub fn check_deadline(now: i64, deadline: i64) -> Result<()> {
    require!(now <= deadline, SwapperError::DeadlineExpired);
    Ok(())
}

/// Caller request shared by both pipelines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    /// Exact amount of the output token to acquire
    pub amount_out: u64,

    /// Native currency the caller puts up; anything unused is refunded
    pub value: u64,

    /// Unix timestamp after which the order is void
    pub deadline: i64,
}

/// Side effects a pipeline needs from the outside world.
pub trait PoolGateway: ReserveSource {
    fn now(&self) -> Result<i64>;

    /// Take the caller's attached value into router custody.
    fn collect(&mut self, value: u64) -> Result<()>;

    /// Convert held native currency into the wrapped token.
    fn wrap(&mut self, amount: u64) -> Result<()>;

    /// Sell `amount_in` wrapped native for the output token. Returns the amount received.
    fn swap(&mut self, amount_in: u64, minimum_out: u64) -> Result<u64>;

    /// Send output tokens to the recipient.
    fn deliver(&mut self, amount: u64) -> Result<()>;

    /// Two-sided deposit; shares go to the recipient.
    fn deposit(&mut self, token_amount: u64, native_amount: u64) -> Result<()>;

    /// Return unused native currency to the caller.
    fn refund(&mut self, amount: u64) -> Result<()>;

    /// Unwind temporary custody once every transfer is done.
    fn settle(&mut self) -> Result<()>;
}
