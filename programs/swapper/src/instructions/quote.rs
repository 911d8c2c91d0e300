use super::CONFIG_SEED;
use crate::pair::{pair_for, PoolAddresses};
use crate::pipeline::task1::{self, Task1Quote};
use crate::pipeline::task2::{self, Task2Quote};
use crate::reserves::PoolSnapshot;
use crate::state::SwapperConfig;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount};

/// Pool address for a pair under any factory
pub fn locate_pair(
    _ctx: Context<PairFor>,
    factory: Pubkey,
    token_a: Pubkey,
    token_b: Pubkey,
) -> Result<Pubkey> {
    let pool = pair_for(&factory, token_a, token_b)?;
    msg!("Pair {} / {} -> {}", token_a, token_b, pool);
    Ok(pool)
}

/// Native currency required to buy exactly `amount_out`
pub fn quote_task1(ctx: Context<QuotePool>, amount_out: u64) -> Result<u64> {
    let (snapshot, pool) = ctx.accounts.snapshot()?;
    let Task1Quote { amount_in } = task1::quote(&snapshot, &pool, amount_out)?;
    msg!("Task 1 quote - Out: {}, In: {}", amount_out, amount_in);
    Ok(amount_in)
}

/// Native currency required for the swap leg and the liquidity leg
pub fn quote_task2(ctx: Context<QuotePool>, amount_out: u64) -> Result<Task2Quote> {
    let (snapshot, pool) = ctx.accounts.snapshot()?;
    let quote = task2::quote(&snapshot, &pool, amount_out)?;
    msg!(
        "Task 2 quote - Out: {}, Swap in: {}, Liquidity in: {}",
        amount_out,
        quote.amount_in_swap,
        quote.amount_in_add_liquidity
    );
    Ok(quote)
}

#[derive(Accounts)]
pub struct PairFor {}

#[derive(Accounts)]
pub struct QuotePool<'info> {
    /// Router configuration
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, SwapperConfig>>,

    /// Token the caller wants to acquire
    pub token_out_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: address checked against the derived pair, owner against the factory
    #[account(owner = config.factory)]
    pub liquidity_pool: UncheckedAccount<'info>,

    /// Pool vault for the lower-ordered mint
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool vault for the higher-ordered mint
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,
}

impl<'info> QuotePool<'info> {
    fn snapshot(&self) -> Result<(PoolSnapshot<'info>, Pubkey)> {
        let addresses = PoolAddresses::derive(
            &self.config.factory,
            self.config.wrapped_native,
            self.token_out_mint.key(),
        )?;
        addresses.check(
            &self.liquidity_pool.key(),
            &self.token_a_vault.key(),
            &self.token_b_vault.key(),
        )?;

        let snapshot = PoolSnapshot {
            addresses,
            native_mint: self.config.wrapped_native,
            pool_state: self.liquidity_pool.to_account_info(),
            token_a_vault: self.token_a_vault.to_account_info(),
            token_b_vault: self.token_b_vault.to_account_info(),
        };
        Ok((snapshot, addresses.pool))
    }
}
