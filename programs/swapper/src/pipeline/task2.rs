//! Swap native currency for a token, then deposit the swapped tokens with a
//! matching native amount as pool liquidity.

use super::{check_deadline, Order, Pipeline, PoolGateway, Stage};
use crate::errors::SwapperError;
use crate::math::{get_amount_in, quote_liquidity};
use crate::reserves::ReserveSource;
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Task2Quote {
    pub amount_in_swap: u64,
    pub amount_in_add_liquidity: u64,
}

impl Task2Quote {
    pub fn total(&self) -> Result<u64> {
        self.amount_in_swap
            .checked_add(self.amount_in_add_liquidity)
            .ok_or(error!(SwapperError::MathOverflow))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Task2Receipt {
    pub quote: Task2Quote,
    pub amount_received: u64,
    pub surplus_delivered: u64,
    pub refunded: u64,
}

/// The liquidity leg is priced against the reserves as they stand right
/// after the swap leg, so the deposit matches the ratio the pool will see.
pub fn quote<S: ReserveSource + ?Sized>(
    source: &S,
    pair: &Pubkey,
    amount_out: u64,
) -> Result<Task2Quote> {
    let reserves = source.read_reserves(pair)?;
    let fee = source.fee_model(pair)?;

    let amount_in_swap =
        get_amount_in(amount_out, reserves.reserve_in, reserves.reserve_out, fee)?;
    let post_swap = reserves.after_swap(amount_in_swap, amount_out)?;
    let amount_in_add_liquidity =
        quote_liquidity(amount_out, post_swap.reserve_out, post_swap.reserve_in)?;
    // A deposit with an empty native side mints nothing.
    require!(amount_in_add_liquidity > 0, SwapperError::InsufficientLiquidity);

    Ok(Task2Quote {
        amount_in_swap,
        amount_in_add_liquidity,
    })
}

pub fn execute<G: PoolGateway>(
    gateway: &mut G,
    pair: &Pubkey,
    order: &Order,
) -> Result<Task2Receipt> {
    let mut pipeline = Pipeline::new();
    check_deadline(gateway.now()?, order.deadline)?;

    let quote = quote(&*gateway, pair, order.amount_out)?;
    let total = quote.total()?;
    require!(order.value >= total, SwapperError::InsufficientPayment);
    msg!(
        "Task 2 quote - Out: {}, Swap in: {}, Liquidity in: {}, Value: {}",
        order.amount_out,
        quote.amount_in_swap,
        quote.amount_in_add_liquidity,
        order.value
    );

    pipeline.advance(Stage::Swapping)?;
    gateway.collect(order.value)?;
    gateway.wrap(quote.amount_in_swap)?;
    let amount_received = gateway.swap(quote.amount_in_swap, order.amount_out)?;

    pipeline.advance(Stage::Depositing)?;
    gateway.wrap(quote.amount_in_add_liquidity)?;
    gateway.deposit(order.amount_out, quote.amount_in_add_liquidity)?;

    // Pools that round in the trader's favour pay out a few extra units.
    let surplus_delivered = amount_received
        .checked_sub(order.amount_out)
        .ok_or(error!(SwapperError::ExternalCallFailure))?;
    if surplus_delivered > 0 {
        gateway.deliver(surplus_delivered)?;
    }

    pipeline.advance(Stage::Refunding)?;
    let refunded = order.value - total;
    if refunded > 0 {
        gateway.refund(refunded)?;
    }
    gateway.settle()?;
    pipeline.advance(Stage::Done)?;

    msg!(
        "Task 2 completed - Deposited: {} token / {} native, Refunded: {}",
        order.amount_out,
        quote.amount_in_add_liquidity,
        refunded
    );

    Ok(Task2Receipt {
        quote,
        amount_received,
        surplus_delivered,
        refunded,
    })
}
