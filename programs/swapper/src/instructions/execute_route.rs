use super::gateway::CpiGateway;
use super::{CONFIG_SEED, ROUTER_AUTHORITY_SEED};
use crate::errors::SwapperError;
use crate::events::{LiquidityZapped, SwapRouted};
use crate::pair::PoolAddresses;
use crate::pipeline::{task1, task2, Order};
use crate::state::SwapperConfig;
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Buy exactly `amount_out` of the output token with native currency
pub fn execute_task1(
    ctx: Context<ExecuteRoute>,
    amount_out: u64,
    value: u64,
    deadline: i64,
) -> Result<()> {
    let authority_bump = ctx.bumps.router_authority;
    let accounts = ctx.accounts;
    let addresses = accounts.begin(false)?;

    let order = Order {
        amount_out,
        value,
        deadline,
    };
    let receipt = {
        let mut gateway = CpiGateway::new(accounts, addresses, authority_bump);
        task1::execute(&mut gateway, &addresses.pool, &order)?
    };

    accounts.config.leave();
    emit!(SwapRouted {
        caller: accounts.caller.key(),
        recipient: accounts.recipient.key(),
        token_out: accounts.token_out_mint.key(),
        amount_in: receipt.amount_in,
        amount_out: receipt.amount_received,
        refunded: receipt.refunded,
    });
    Ok(())
}

/// Buy `amount_out` of the output token and deposit it with matching native
/// currency; pool shares are minted to the recipient
pub fn execute_task2(
    ctx: Context<ExecuteRoute>,
    amount_out: u64,
    value: u64,
    deadline: i64,
) -> Result<()> {
    let authority_bump = ctx.bumps.router_authority;
    let accounts = ctx.accounts;
    let addresses = accounts.begin(true)?;

    let order = Order {
        amount_out,
        value,
        deadline,
    };
    let receipt = {
        let mut gateway = CpiGateway::new(accounts, addresses, authority_bump);
        task2::execute(&mut gateway, &addresses.pool, &order)?
    };

    accounts.config.leave();
    emit!(LiquidityZapped {
        caller: accounts.caller.key(),
        recipient: accounts.recipient.key(),
        token_out: accounts.token_out_mint.key(),
        amount_out,
        amount_in_swap: receipt.quote.amount_in_swap,
        amount_in_add_liquidity: receipt.quote.amount_in_add_liquidity,
        refunded: receipt.refunded,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ExecuteRoute<'info> {
    /// Router configuration; also carries the call-depth guard
    #[account(mut, seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, SwapperConfig>>,

    /// PDA that briefly holds the caller's value and owns the escrows
    #[account(mut, seeds = [ROUTER_AUTHORITY_SEED], bump)]
    pub router_authority: SystemAccount<'info>,

    /// Pays the attached value and receives refunds
    #[account(mut)]
    pub caller: Signer<'info>,

    /// CHECK: only used as the owner of the recipient token accounts
    pub recipient: UncheckedAccount<'info>,

    #[account(address = config.wrapped_native)]
    pub wrapped_native_mint: Box<InterfaceAccount<'info, Mint>>,

    pub token_out_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Router escrow for wrapped native, closed at the end of the call
    #[account(
        init_if_needed,
        payer = caller,
        associated_token::mint = wrapped_native_mint,
        associated_token::authority = router_authority,
        associated_token::token_program = token_program,
    )]
    pub native_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Router escrow for the output token, closed at the end of the call
    #[account(
        init_if_needed,
        payer = caller,
        associated_token::mint = token_out_mint,
        associated_token::authority = router_authority,
        associated_token::token_program = token_program,
    )]
    pub token_escrow: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the output token
    #[account(
        mut,
        constraint = recipient_token_account.mint == token_out_mint.key(),
        constraint = recipient_token_account.owner == recipient.key(),
    )]
    pub recipient_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: address checked against the derived pair, owner against the factory
    #[account(mut, owner = config.factory)]
    pub liquidity_pool: UncheckedAccount<'info>,

    /// CHECK: address checked against the derived pair
    pub pool_authority: UncheckedAccount<'info>,

    /// Pool vault for the lower-ordered mint
    #[account(mut)]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool vault for the higher-ordered mint
    #[account(mut)]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool share mint, required for the liquidity zap
    #[account(mut)]
    pub lp_token_mint: Option<Box<InterfaceAccount<'info, Mint>>>,

    /// Receives pool shares, required for the liquidity zap
    #[account(
        mut,
        constraint = recipient_lp_token_account.owner == recipient.key(),
    )]
    pub recipient_lp_token_account: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    /// CHECK: must be the configured factory program
    #[account(executable, address = config.factory)]
    pub pool_program: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> ExecuteRoute<'info> {
    /// Validate the pool accounts and raise the call-depth guard.
    fn begin(&mut self, requires_shares: bool) -> Result<PoolAddresses> {
        let addresses = PoolAddresses::derive(
            &self.config.factory,
            self.wrapped_native_mint.key(),
            self.token_out_mint.key(),
        )?;
        addresses.check(
            &self.liquidity_pool.key(),
            &self.token_a_vault.key(),
            &self.token_b_vault.key(),
        )?;
        require_keys_eq!(
            self.pool_authority.key(),
            addresses.pool_authority,
            SwapperError::PoolMismatch
        );
        addresses.check_share_accounts(
            self.lp_token_mint.as_ref().map(|mint| mint.key()).as_ref(),
            self.recipient_lp_token_account
                .as_ref()
                .map(|account| account.mint)
                .as_ref(),
            requires_shares,
        )?;

        // Persist the guard before any CPI can observe the config.
        self.config.enter()?;
        self.config.exit(&crate::ID)?;
        Ok(addresses)
    }
}
