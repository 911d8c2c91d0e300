//! Constant-product pricing with an explicit fee fraction.
//!
//! All amounts are SPL token amounts (`u64`). Products are evaluated in 256-bit
//! integers so that `reserve * amount * fee_denominator` can never overflow.
//! Inputs round up and outputs round down.

use crate::errors::SwapperError;
use anchor_lang::prelude::*;

#[allow(clippy::assign_op_pattern, clippy::manual_div_ceil, clippy::ptr_offset_with_cast)]
mod wide {
    use uint::construct_uint;

    construct_uint! {
        /// 256-bit unsigned integer for intermediate products.
        pub struct U256(4);
    }
}

pub use wide::U256;

/// Portion of the input that stays in the trade after the fee,
/// e.g. 997/1000 for a 0.3% fee.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeModel {
    pub numerator: u64,
    pub denominator: u64,
}

impl FeeModel {
    /// 0.3% fee, the common constant-product default.
    pub const STANDARD: FeeModel = FeeModel {
        numerator: 997,
        denominator: 1000,
    };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        require!(denominator > 0, SwapperError::InvalidFeeParameters);
        require!(numerator > 0, SwapperError::InvalidFeeParameters);
        require!(numerator <= denominator, SwapperError::InvalidFeeParameters);
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Build from a pool that stores the fee it charges (e.g. 3/1000).
    pub fn from_charged(fee_numerator: u64, fee_denominator: u64) -> Result<Self> {
        require!(fee_numerator < fee_denominator, SwapperError::InvalidFeeParameters);
        Self::new(fee_denominator - fee_numerator, fee_denominator)
    }
}

fn narrow(value: U256) -> Result<u64> {
    require!(value <= U256::from(u64::MAX), SwapperError::MathOverflow);
    Ok(value.as_u64())
}

/// Input required to receive exactly `amount_out` from the pool.
///
/// `floor(reserve_in * amount_out * den / ((reserve_out - amount_out) * num)) + 1`
pub fn get_amount_in(
    amount_out: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee: FeeModel,
) -> Result<u64> {
    require!(amount_out > 0, SwapperError::ZeroAmount);
    require!(
        reserve_in > 0 && reserve_out > 0,
        SwapperError::InsufficientLiquidity
    );
    require!(
        amount_out < reserve_out,
        SwapperError::InsufficientLiquidity
    );

    let numerator =
        U256::from(reserve_in) * U256::from(amount_out) * U256::from(fee.denominator);
    let denominator = U256::from(reserve_out - amount_out) * U256::from(fee.numerator);

    narrow(numerator / denominator + U256::one())
}

/// Output paid by the pool for `amount_in`.
///
/// `floor(amount_in * num * reserve_out / (reserve_in * den + amount_in * num))`
pub fn get_amount_out(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee: FeeModel,
) -> Result<u64> {
    require!(amount_in > 0, SwapperError::ZeroAmount);
    require!(
        reserve_in > 0 && reserve_out > 0,
        SwapperError::InsufficientLiquidity
    );

    let amount_in_with_fee = U256::from(amount_in) * U256::from(fee.numerator);
    let numerator = amount_in_with_fee * U256::from(reserve_out);
    let denominator = U256::from(reserve_in) * U256::from(fee.denominator) + amount_in_with_fee;

    narrow(numerator / denominator)
}

/// Amount of the other side that pairs with `amount_a` at the current ratio.
pub fn quote_liquidity(amount_a: u64, reserve_a: u64, reserve_b: u64) -> Result<u64> {
    require!(amount_a > 0, SwapperError::ZeroAmount);
    require!(
        reserve_a > 0 && reserve_b > 0,
        SwapperError::InsufficientLiquidity
    );

    narrow(U256::from(amount_a) * U256::from(reserve_b) / U256::from(reserve_a))
}
