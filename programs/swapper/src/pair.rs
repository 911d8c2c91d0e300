//! Deterministic pool address derivation.
//!
//! Pools are program-derived addresses of the factory program seeded with the
//! two mints in ascending byte order, so no on-chain lookup is needed.

use crate::errors::SwapperError;
use anchor_lang::prelude::*;

pub const POOL_SEED: &[u8] = b"liquidity_pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const TOKEN_A_VAULT_SEED: &[u8] = b"token_a_vault";
pub const TOKEN_B_VAULT_SEED: &[u8] = b"token_b_vault";
pub const LP_TOKEN_MINT_SEED: &[u8] = b"lp_token_mint";

/// Order two mints canonically. Identical mints do not form a pair.
pub fn sort_tokens(token_a: Pubkey, token_b: Pubkey) -> Result<(Pubkey, Pubkey)> {
    require_keys_neq!(token_a, token_b, SwapperError::InvalidPair);
    if token_a.to_bytes() < token_b.to_bytes() {
        Ok((token_a, token_b))
    } else {
        Ok((token_b, token_a))
    }
}

/// Pool state address for a pair, independent of argument order.
///
/// Only pools whose creator passed the mints in ascending byte order are
/// found here. The factory seeds `liquidity_pool` with the mints in the order
/// given at creation, so a pool created the other way round lives at a
/// different address and cannot be routed to.
pub fn pair_for(factory: &Pubkey, token_a: Pubkey, token_b: Pubkey) -> Result<Pubkey> {
    let (token0, token1) = sort_tokens(token_a, token_b)?;
    let (pool, _) =
        Pubkey::find_program_address(&[POOL_SEED, token0.as_ref(), token1.as_ref()], factory);
    Ok(pool)
}

/// Every account the factory derives for one pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolAddresses {
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub pool: Pubkey,
    pub pool_authority: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub lp_token_mint: Pubkey,
}

impl PoolAddresses {
    pub fn derive(factory: &Pubkey, token_a: Pubkey, token_b: Pubkey) -> Result<Self> {
        let (token_a_mint, token_b_mint) = sort_tokens(token_a, token_b)?;
        let pool = pair_for(factory, token_a_mint, token_b_mint)?;
        let derive = |seed: &[u8]| Pubkey::find_program_address(&[seed, pool.as_ref()], factory).0;

        Ok(Self {
            token_a_mint,
            token_b_mint,
            pool,
            pool_authority: derive(POOL_AUTHORITY_SEED),
            token_a_vault: derive(TOKEN_A_VAULT_SEED),
            token_b_vault: derive(TOKEN_B_VAULT_SEED),
            lp_token_mint: derive(LP_TOKEN_MINT_SEED),
        })
    }

    /// Reject pool accounts that were not derived from this pair.
    pub fn check(
        &self,
        pool: &Pubkey,
        token_a_vault: &Pubkey,
        token_b_vault: &Pubkey,
    ) -> Result<()> {
        require_keys_eq!(*pool, self.pool, SwapperError::PoolMismatch);
        require_keys_eq!(*token_a_vault, self.token_a_vault, SwapperError::PoolMismatch);
        require_keys_eq!(*token_b_vault, self.token_b_vault, SwapperError::PoolMismatch);
        Ok(())
    }

    /// Check the share mint and the account receiving shares, if passed.
    /// A liquidity deposit needs both.
    pub fn check_share_accounts(
        &self,
        lp_token_mint: Option<&Pubkey>,
        share_account_mint: Option<&Pubkey>,
        required: bool,
    ) -> Result<()> {
        if required {
            require!(
                lp_token_mint.is_some() && share_account_mint.is_some(),
                SwapperError::MissingLiquidityAccounts
            );
        }
        if let Some(lp_token_mint) = lp_token_mint {
            require_keys_eq!(*lp_token_mint, self.lp_token_mint, SwapperError::PoolMismatch);
        }
        if let Some(share_account_mint) = share_account_mint {
            require_keys_eq!(
                *share_account_mint,
                self.lp_token_mint,
                SwapperError::PoolMismatch
            );
        }
        Ok(())
    }

    /// Whether `mint` sits on the pool's token A side.
    pub fn is_token_a(&self, mint: &Pubkey) -> bool {
        self.token_a_mint == *mint
    }

    /// Place a (native, token) pair onto the pool's (A, B) sides.
    pub fn to_sides<T>(&self, native_mint: &Pubkey, native: T, token: T) -> (T, T) {
        if self.is_token_a(native_mint) {
            (native, token)
        } else {
            (token, native)
        }
    }

    /// Read the pool's (A, B) sides back as (native, token).
    pub fn from_sides<T>(&self, native_mint: &Pubkey, side_a: T, side_b: T) -> (T, T) {
        if self.is_token_a(native_mint) {
            (side_a, side_b)
        } else {
            (side_b, side_a)
        }
    }
}
