//! Exact-output swap paid in native currency.

use super::{check_deadline, Order, Pipeline, PoolGateway, Stage};
use crate::errors::SwapperError;
use crate::math::get_amount_in;
use crate::reserves::ReserveSource;
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Task1Quote {
    pub amount_in: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Task1Receipt {
    pub amount_in: u64,
    pub amount_received: u64,
    pub refunded: u64,
}

pub fn quote<S: ReserveSource + ?Sized>(
    source: &S,
    pair: &Pubkey,
    amount_out: u64,
) -> Result<Task1Quote> {
    let reserves = source.read_reserves(pair)?;
    let fee = source.fee_model(pair)?;
    let amount_in = get_amount_in(amount_out, reserves.reserve_in, reserves.reserve_out, fee)?;
    Ok(Task1Quote { amount_in })
}

pub fn execute<G: PoolGateway>(
    gateway: &mut G,
    pair: &Pubkey,
    order: &Order,
) -> Result<Task1Receipt> {
    let mut pipeline = Pipeline::new();
    check_deadline(gateway.now()?, order.deadline)?;

    let Task1Quote { amount_in } = quote(&*gateway, pair, order.amount_out)?;
    require!(order.value >= amount_in, SwapperError::InsufficientPayment);
    msg!(
        "Task 1 quote - Out: {}, In: {}, Value: {}",
        order.amount_out,
        amount_in,
        order.value
    );

    // Collecting and wrapping value between the quote and the swap leaves the
    // pool reserves untouched.
    pipeline.advance(Stage::Swapping)?;
    gateway.collect(order.value)?;
    gateway.wrap(amount_in)?;
    let amount_received = gateway.swap(amount_in, order.amount_out)?;
    gateway.deliver(amount_received)?;

    pipeline.advance(Stage::Refunding)?;
    let refunded = order.value - amount_in;
    if refunded > 0 {
        gateway.refund(refunded)?;
    }
    gateway.settle()?;
    pipeline.advance(Stage::Done)?;

    msg!(
        "Task 1 completed - In: {}, Received: {}, Refunded: {}",
        amount_in,
        amount_received,
        refunded
    );

    Ok(Task1Receipt {
        amount_in,
        amount_received,
        refunded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::simulated::{code, SimulatedPool, NOW, RECIPIENT_START};

    fn order(amount_out: u64, value: u64, deadline: i64) -> Order {
        Order {
            amount_out,
            value,
            deadline,
        }
    }

    #[test]
    fn quote_uses_current_reserves() {
        let pool = SimulatedPool::new(1_000_000, 500_000);
        assert_eq!(quote(&pool, &pool.pair, 1_000).unwrap().amount_in, 2_011);
    }

    #[test]
    fn swap_moves_exact_amounts() {
        let mut pool = SimulatedPool::new(1_000_000, 500_000);
        let pair = pool.pair;
        let caller_start = pool.caller_lamports;
        let amount_in = quote(&pool, &pair, 1_000).unwrap().amount_in;

        let receipt = execute(&mut pool, &pair, &order(1_000, amount_in, NOW)).unwrap();

        assert_eq!(receipt.amount_in, amount_in);
        assert_eq!(receipt.refunded, 0);
        assert_eq!(pool.caller_lamports, caller_start - amount_in);
        assert_eq!(pool.recipient_tokens - RECIPIENT_START, 1_000);
        assert_eq!(pool.native_reserve, 1_000_000 + amount_in);
        assert_eq!(pool.token_reserve, 499_000);
        pool.assert_no_custody();
    }

    #[test]
    fn excess_value_is_refunded() {
        let mut pool = SimulatedPool::new(1_000_000, 500_000);
        let pair = pool.pair;
        let caller_start = pool.caller_lamports;

        let receipt = execute(&mut pool, &pair, &order(1_000, 5_000, NOW)).unwrap();

        assert_eq!(receipt.refunded, 5_000 - 2_011);
        assert_eq!(pool.caller_lamports, caller_start - 2_011);
        assert_eq!(pool.calls.last(), Some(&"settle"));
        pool.assert_no_custody();
    }

    #[test]
    fn underpayment_fails_before_any_transfer() {
        let mut pool = SimulatedPool::new(1_000_000, 500_000);
        let pair = pool.pair;

        let err = execute(&mut pool, &pair, &order(1_000, 2_010, NOW)).unwrap_err();

        assert_eq!(code(err), u32::from(SwapperError::InsufficientPayment));
        assert!(pool.calls.is_empty());
    }

    #[test]
    fn expired_deadline_fails_before_quoting() {
        let mut pool = SimulatedPool::new(1_000_000, 500_000);
        let pair = pool.pair;

        let err = execute(&mut pool, &pair, &order(1_000, 5_000, NOW - 1)).unwrap_err();

        assert_eq!(code(err), u32::from(SwapperError::DeadlineExpired));
        assert!(pool.calls.is_empty());
        assert_eq!(pool.reserve_reads(), 0);
    }

    #[test]
    fn draining_the_pool_is_illiquid() {
        let mut pool = SimulatedPool::new(1_000_000, 500_000);
        let pair = pool.pair;

        let err = execute(&mut pool, &pair, &order(500_000, u64::MAX, NOW)).unwrap_err();

        assert_eq!(code(err), u32::from(SwapperError::InsufficientLiquidity));
        assert!(pool.calls.is_empty());
    }

    #[test]
    fn reserves_are_read_fresh_each_call() {
        let mut pool = SimulatedPool::new(1_000_000, 500_000);
        let pair = pool.pair;
        let first = quote(&pool, &pair, 1_000).unwrap();

        execute(&mut pool, &pair, &order(1_000, first.amount_in, NOW)).unwrap();
        let second = quote(&pool, &pair, 1_000).unwrap();

        assert!(second.amount_in > first.amount_in);

        // Stale quote no longer covers the same output.
        let err = execute(&mut pool, &pair, &order(1_000, first.amount_in, NOW)).unwrap_err();
        assert_eq!(code(err), u32::from(SwapperError::InsufficientPayment));
    }

    #[test]
    fn unknown_pair_is_rejected() {
        let pool = SimulatedPool::new(1_000_000, 500_000);
        let err = quote(&pool, &Pubkey::new_unique(), 1_000).unwrap_err();
        assert_eq!(code(err), u32::from(SwapperError::PoolMismatch));
    }
}
