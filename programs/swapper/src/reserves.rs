//! Fresh reserve reads for one pair.
//!
//! Reserves are never cached: every call to [`ReserveSource::read_reserves`]
//! goes back to the vault accounts, so a read issued after a CPI sees the
//! post-CPI balances.

use crate::errors::SwapperError;
use crate::math::FeeModel;
use crate::pair::PoolAddresses;
use crate::state::PoolState;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

/// Pool balances oriented for a native-in, token-out trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reserves {
    pub reserve_in: u64,
    pub reserve_out: u64,
}

impl Reserves {
    pub fn new(reserve_in: u64, reserve_out: u64) -> Result<Self> {
        require!(
            reserve_in > 0 && reserve_out > 0,
            SwapperError::InsufficientLiquidity
        );
        Ok(Self {
            reserve_in,
            reserve_out,
        })
    }

    /// Balances right after a swap of `amount_in` for `amount_out`.
    pub fn after_swap(&self, amount_in: u64, amount_out: u64) -> Result<Self> {
        let reserve_in = self
            .reserve_in
            .checked_add(amount_in)
            .ok_or(error!(SwapperError::MathOverflow))?;
        let reserve_out = self
            .reserve_out
            .checked_sub(amount_out)
            .ok_or(error!(SwapperError::InsufficientLiquidity))?;
        Self::new(reserve_in, reserve_out)
    }
}

pub trait ReserveSource {
    fn read_reserves(&self, pair: &Pubkey) -> Result<Reserves>;

    fn fee_model(&self, pair: &Pubkey) -> Result<FeeModel>;
}

pub(crate) fn read_token_amount(account: &AccountInfo) -> Result<u64> {
    let data = account.try_borrow_data()?;
    let token_account = TokenAccount::try_deserialize(&mut &data[..])?;
    Ok(token_account.amount)
}

/// Reads a live pool straight from its state and vault accounts.
pub struct PoolSnapshot<'info> {
    pub addresses: PoolAddresses,
    pub native_mint: Pubkey,
    pub pool_state: AccountInfo<'info>,
    pub token_a_vault: AccountInfo<'info>,
    pub token_b_vault: AccountInfo<'info>,
}

impl<'info> PoolSnapshot<'info> {
    fn check_pair(&self, pair: &Pubkey) -> Result<()> {
        require_keys_eq!(*pair, self.addresses.pool, SwapperError::PoolMismatch);
        Ok(())
    }
}

impl<'info> ReserveSource for PoolSnapshot<'info> {
    fn read_reserves(&self, pair: &Pubkey) -> Result<Reserves> {
        self.check_pair(pair)?;
        let balance_a = read_token_amount(&self.token_a_vault)?;
        let balance_b = read_token_amount(&self.token_b_vault)?;

        let (reserve_in, reserve_out) =
            self.addresses.from_sides(&self.native_mint, balance_a, balance_b);
        Reserves::new(reserve_in, reserve_out)
    }

    fn fee_model(&self, pair: &Pubkey) -> Result<FeeModel> {
        self.check_pair(pair)?;
        let data = self.pool_state.try_borrow_data()?;
        PoolState::decode(&data)?.fee_model()
    }
}
