use super::CONFIG_SEED;
use crate::state::SwapperConfig;
use anchor_lang::prelude::*;

/// Fix the factory and wrapped-native references for this router
pub fn process(ctx: Context<Initialize>, factory: Pubkey, wrapped_native: Pubkey) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.factory = factory;
    config.wrapped_native = wrapped_native;
    config.locked = false;
    config.bump = ctx.bumps.config;

    msg!(
        "Router initialized - Factory: {}, Wrapped native: {}",
        factory,
        wrapped_native
    );
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Router configuration PDA
    #[account(
        init,
        space = 8 + SwapperConfig::ACCOUNT_SIZE,
        payer = payer,
        seeds = [CONFIG_SEED],
        bump,
    )]
    pub config: Box<Account<'info, SwapperConfig>>,

    /// Account that pays for initialization
    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
