use super::execute_route::ExecuteRoute;
use super::ROUTER_AUTHORITY_SEED;
use crate::errors::SwapperError;
use crate::math::FeeModel;
use crate::pair::PoolAddresses;
use crate::pipeline::PoolGateway;
use crate::pool::{self, DepositLiquidity, SwapTokens};
use crate::reserves::{read_token_amount, PoolSnapshot, ReserveSource, Reserves};
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token_interface::{self, CloseAccount, SyncNative, TransferChecked};

/// Runs pipeline side effects as CPIs signed by the router authority PDA.
pub struct CpiGateway<'a, 'info> {
    accounts: &'a ExecuteRoute<'info>,
    addresses: PoolAddresses,
    authority_bump: [u8; 1],
}

impl<'a, 'info> CpiGateway<'a, 'info> {
    pub fn new(
        accounts: &'a ExecuteRoute<'info>,
        addresses: PoolAddresses,
        authority_bump: u8,
    ) -> Self {
        Self {
            accounts,
            addresses,
            authority_bump: [authority_bump],
        }
    }

    fn authority_seeds(&self) -> [&[u8]; 2] {
        [ROUTER_AUTHORITY_SEED, &self.authority_bump]
    }

    fn native_mint(&self) -> Pubkey {
        self.accounts.wrapped_native_mint.key()
    }

    fn snapshot(&self) -> PoolSnapshot<'info> {
        PoolSnapshot {
            addresses: self.addresses,
            native_mint: self.native_mint(),
            pool_state: self.accounts.liquidity_pool.to_account_info(),
            token_a_vault: self.accounts.token_a_vault.to_account_info(),
            token_b_vault: self.accounts.token_b_vault.to_account_info(),
        }
    }

    fn escrowed_tokens(&self) -> Result<u64> {
        read_token_amount(&self.accounts.token_escrow.to_account_info())
    }

    fn close_escrow(&self, escrow: AccountInfo<'info>) -> Result<()> {
        let seeds = self.authority_seeds();
        let signer_seeds = &[&seeds[..]];

        token_interface::close_account(CpiContext::new_with_signer(
            self.accounts.token_program.to_account_info(),
            CloseAccount {
                account: escrow,
                destination: self.accounts.caller.to_account_info(),
                authority: self.accounts.router_authority.to_account_info(),
            },
            signer_seeds,
        ))
    }
}

impl<'a, 'info> ReserveSource for CpiGateway<'a, 'info> {
    fn read_reserves(&self, pair: &Pubkey) -> Result<Reserves> {
        self.snapshot().read_reserves(pair)
    }

    fn fee_model(&self, pair: &Pubkey) -> Result<FeeModel> {
        self.snapshot().fee_model(pair)
    }
}

impl<'a, 'info> PoolGateway for CpiGateway<'a, 'info> {
    fn now(&self) -> Result<i64> {
        Ok(Clock::get()?.unix_timestamp)
    }

    fn collect(&mut self, value: u64) -> Result<()> {
        system_program::transfer(
            CpiContext::new(
                self.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: self.accounts.caller.to_account_info(),
                    to: self.accounts.router_authority.to_account_info(),
                },
            ),
            value,
        )
    }

    fn wrap(&mut self, amount: u64) -> Result<()> {
        let seeds = self.authority_seeds();
        let signer_seeds = &[&seeds[..]];

        system_program::transfer(
            CpiContext::new_with_signer(
                self.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: self.accounts.router_authority.to_account_info(),
                    to: self.accounts.native_escrow.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;

        token_interface::sync_native(CpiContext::new(
            self.accounts.token_program.to_account_info(),
            SyncNative {
                account: self.accounts.native_escrow.to_account_info(),
            },
        ))?;

        msg!("Wrapped {} lamports", amount);
        Ok(())
    }

    fn swap(&mut self, amount_in: u64, minimum_out: u64) -> Result<u64> {
        let seeds = self.authority_seeds();
        let signer_seeds = &[&seeds[..]];
        let (input_token_vault, output_token_vault) = self.addresses.from_sides(
            &self.native_mint(),
            &self.accounts.token_a_vault,
            &self.accounts.token_b_vault,
        );

        let before = self.escrowed_tokens()?;
        pool::swap_tokens(
            self.accounts.pool_program.to_account_info(),
            SwapTokens {
                liquidity_pool: self.accounts.liquidity_pool.to_account_info(),
                pool_authority: self.accounts.pool_authority.to_account_info(),
                input_token_vault: input_token_vault.to_account_info(),
                output_token_vault: output_token_vault.to_account_info(),
                user_input_token_account: self.accounts.native_escrow.to_account_info(),
                user_output_token_account: self.accounts.token_escrow.to_account_info(),
                user: self.accounts.router_authority.to_account_info(),
                token_program: self.accounts.token_program.to_account_info(),
            },
            amount_in,
            minimum_out,
            signer_seeds,
        )?;
        let received = self
            .escrowed_tokens()?
            .checked_sub(before)
            .ok_or(error!(SwapperError::ExternalCallFailure))?;

        msg!("Swapped {} wrapped native for {} tokens", amount_in, received);
        Ok(received)
    }

    fn deliver(&mut self, amount: u64) -> Result<()> {
        let seeds = self.authority_seeds();
        let signer_seeds = &[&seeds[..]];

        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                self.accounts.token_program.to_account_info(),
                TransferChecked {
                    from: self.accounts.token_escrow.to_account_info(),
                    mint: self.accounts.token_out_mint.to_account_info(),
                    to: self.accounts.recipient_token_account.to_account_info(),
                    authority: self.accounts.router_authority.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
            self.accounts.token_out_mint.decimals,
        )
    }

    fn deposit(&mut self, token_amount: u64, native_amount: u64) -> Result<()> {
        let seeds = self.authority_seeds();
        let signer_seeds = &[&seeds[..]];
        let lp_token_mint = self
            .accounts
            .lp_token_mint
            .as_ref()
            .ok_or(error!(SwapperError::MissingLiquidityAccounts))?;
        let recipient_lp_token_account = self
            .accounts
            .recipient_lp_token_account
            .as_ref()
            .ok_or(error!(SwapperError::MissingLiquidityAccounts))?;

        let native_escrow = self.accounts.native_escrow.to_account_info();
        let token_escrow = self.accounts.token_escrow.to_account_info();
        let native_mint = self.native_mint();
        let (user_token_a_account, user_token_b_account) =
            self.addresses.to_sides(&native_mint, native_escrow, token_escrow);
        let (token_a_amount, token_b_amount) =
            self.addresses.to_sides(&native_mint, native_amount, token_amount);

        pool::deposit_liquidity(
            self.accounts.pool_program.to_account_info(),
            DepositLiquidity {
                liquidity_pool: self.accounts.liquidity_pool.to_account_info(),
                pool_authority: self.accounts.pool_authority.to_account_info(),
                token_a_vault: self.accounts.token_a_vault.to_account_info(),
                token_b_vault: self.accounts.token_b_vault.to_account_info(),
                lp_token_mint: lp_token_mint.to_account_info(),
                user_token_a_account,
                user_token_b_account,
                user_lp_token_account: recipient_lp_token_account.to_account_info(),
                user: self.accounts.router_authority.to_account_info(),
                token_program: self.accounts.token_program.to_account_info(),
            },
            token_a_amount,
            token_b_amount,
            signer_seeds,
        )?;

        msg!(
            "Deposited liquidity - Token: {}, Wrapped native: {}",
            token_amount,
            native_amount
        );
        Ok(())
    }

    fn refund(&mut self, amount: u64) -> Result<()> {
        let seeds = self.authority_seeds();
        let signer_seeds = &[&seeds[..]];

        system_program::transfer(
            CpiContext::new_with_signer(
                self.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: self.accounts.router_authority.to_account_info(),
                    to: self.accounts.caller.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;

        msg!("Refunded {} lamports", amount);
        Ok(())
    }

    /// Closing the native escrow unwraps whatever the pool left behind.
    fn settle(&mut self) -> Result<()> {
        let leftover = self.escrowed_tokens()?;
        if leftover > 0 {
            self.deliver(leftover)?;
        }

        self.close_escrow(self.accounts.token_escrow.to_account_info())?;
        self.close_escrow(self.accounts.native_escrow.to_account_info())
    }
}
