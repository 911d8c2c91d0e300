//! Cross-program calls into the constant-product pool program.
//!
//! The pool is an Anchor program; its instructions are addressed by the
//! 8-byte `sha256("global:<name>")` prefix followed by borsh arguments.

use crate::errors::SwapperError;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;

/// sha256("global:swap_tokens")[..8]
pub const SWAP_TOKENS_DISCRIMINATOR: [u8; 8] = [201, 226, 234, 16, 70, 155, 131, 206];

/// sha256("global:deposit_liquidity")[..8]
pub const DEPOSIT_LIQUIDITY_DISCRIMINATOR: [u8; 8] = [245, 99, 59, 25, 151, 71, 233, 249];

pub struct SwapTokens<'info> {
    pub liquidity_pool: AccountInfo<'info>,
    pub pool_authority: AccountInfo<'info>,
    pub input_token_vault: AccountInfo<'info>,
    pub output_token_vault: AccountInfo<'info>,
    pub user_input_token_account: AccountInfo<'info>,
    pub user_output_token_account: AccountInfo<'info>,
    pub user: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

pub struct DepositLiquidity<'info> {
    pub liquidity_pool: AccountInfo<'info>,
    pub pool_authority: AccountInfo<'info>,
    pub token_a_vault: AccountInfo<'info>,
    pub token_b_vault: AccountInfo<'info>,
    pub lp_token_mint: AccountInfo<'info>,
    pub user_token_a_account: AccountInfo<'info>,
    pub user_token_b_account: AccountInfo<'info>,
    pub user_lp_token_account: AccountInfo<'info>,
    pub user: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

fn instruction_data(discriminator: [u8; 8], first: u64, second: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(24);
    data.extend_from_slice(&discriminator);
    data.extend_from_slice(&first.to_le_bytes());
    data.extend_from_slice(&second.to_le_bytes());
    data
}

fn invoke_pool(
    instruction: &Instruction,
    account_infos: &[AccountInfo],
    signer_seeds: &[&[&[u8]]],
    action: &str,
) -> Result<()> {
    invoke_signed(instruction, account_infos, signer_seeds).map_err(|err| {
        msg!("Pool rejected {}: {}", action, err);
        error!(SwapperError::ExternalCallFailure)
    })
}

/// Exact-input swap paying into `user_output_token_account`.
pub fn swap_tokens<'info>(
    pool_program: AccountInfo<'info>,
    accounts: SwapTokens<'info>,
    input_amount: u64,
    minimum_output_amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let instruction = Instruction {
        program_id: pool_program.key(),
        accounts: vec![
            AccountMeta::new(accounts.liquidity_pool.key(), false),
            AccountMeta::new_readonly(accounts.pool_authority.key(), false),
            AccountMeta::new(accounts.input_token_vault.key(), false),
            AccountMeta::new(accounts.output_token_vault.key(), false),
            AccountMeta::new(accounts.user_input_token_account.key(), false),
            AccountMeta::new(accounts.user_output_token_account.key(), false),
            AccountMeta::new_readonly(accounts.user.key(), true),
            AccountMeta::new_readonly(accounts.token_program.key(), false),
        ],
        data: instruction_data(SWAP_TOKENS_DISCRIMINATOR, input_amount, minimum_output_amount),
    };

    invoke_pool(
        &instruction,
        &[
            accounts.liquidity_pool,
            accounts.pool_authority,
            accounts.input_token_vault,
            accounts.output_token_vault,
            accounts.user_input_token_account,
            accounts.user_output_token_account,
            accounts.user,
            accounts.token_program,
            pool_program,
        ],
        signer_seeds,
        "swap",
    )
}

/// Two-sided deposit; amounts are in the pool's token A / token B order.
pub fn deposit_liquidity<'info>(
    pool_program: AccountInfo<'info>,
    accounts: DepositLiquidity<'info>,
    token_a_amount: u64,
    token_b_amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let instruction = Instruction {
        program_id: pool_program.key(),
        accounts: vec![
            AccountMeta::new(accounts.liquidity_pool.key(), false),
            AccountMeta::new_readonly(accounts.pool_authority.key(), false),
            AccountMeta::new(accounts.token_a_vault.key(), false),
            AccountMeta::new(accounts.token_b_vault.key(), false),
            AccountMeta::new(accounts.lp_token_mint.key(), false),
            AccountMeta::new(accounts.user_token_a_account.key(), false),
            AccountMeta::new(accounts.user_token_b_account.key(), false),
            AccountMeta::new(accounts.user_lp_token_account.key(), false),
            AccountMeta::new_readonly(accounts.user.key(), true),
            AccountMeta::new_readonly(accounts.token_program.key(), false),
        ],
        data: instruction_data(DEPOSIT_LIQUIDITY_DISCRIMINATOR, token_a_amount, token_b_amount),
    };

    invoke_pool(
        &instruction,
        &[
            accounts.liquidity_pool,
            accounts.pool_authority,
            accounts.token_a_vault,
            accounts.token_b_vault,
            accounts.lp_token_mint,
            accounts.user_token_a_account,
            accounts.user_token_b_account,
            accounts.user_lp_token_account,
            accounts.user,
            accounts.token_program,
            pool_program,
        ],
        signer_seeds,
        "deposit",
    )
}
