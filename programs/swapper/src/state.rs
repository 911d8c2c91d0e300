use crate::errors::SwapperError;
use crate::math::FeeModel;
use anchor_lang::prelude::*;

/// Router configuration, fixed at initialization
#[account]
#[derive(Default)]
pub struct SwapperConfig {
    /// Program id of the constant-product pool factory
    pub factory: Pubkey,

    /// Mint of the wrapped native currency
    pub wrapped_native: Pubkey,

    /// Set while a pipeline is executing
    pub locked: bool,

    pub bump: u8,
}

impl SwapperConfig {
    /// 32 + 32 + 1 + 1 for the fields, discriminator excluded
    pub const ACCOUNT_SIZE: usize = 32 + 32 + 1 + 1;

    pub fn enter(&mut self) -> Result<()> {
        require!(!self.locked, SwapperError::Reentrancy);
        self.locked = true;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.locked = false;
    }
}

/// Pool state as laid out by the factory program.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolState {
    pub total_lp_tokens_issued: u64,

    /// Fee charged on input, e.g. 3/1000
    pub fee_numerator: u64,
    pub fee_denominator: u64,
}

impl PoolState {
    /// sha256("account:LiquidityPool")[..8]
    pub const DISCRIMINATOR: [u8; 8] = [66, 38, 17, 64, 188, 80, 68, 129];

    pub fn decode(data: &[u8]) -> Result<Self> {
        require!(data.len() >= 8, SwapperError::PoolMismatch);
        let (discriminator, mut body) = data.split_at(8);
        require!(
            discriminator == Self::DISCRIMINATOR,
            SwapperError::PoolMismatch
        );
        Self::deserialize(&mut body).map_err(|_| error!(SwapperError::PoolMismatch))
    }

    pub fn fee_model(&self) -> Result<FeeModel> {
        FeeModel::from_charged(self.fee_numerator, self.fee_denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(state: &PoolState) -> Vec<u8> {
        let mut data = PoolState::DISCRIMINATOR.to_vec();
        state.serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn decodes_pool_state() {
        let state = PoolState {
            total_lp_tokens_issued: 42,
            fee_numerator: 3,
            fee_denominator: 1000,
        };
        let decoded = PoolState::decode(&encoded(&state)).unwrap();
        assert_eq!(decoded, state);
        assert_eq!(decoded.fee_model().unwrap(), FeeModel::STANDARD);
    }

    #[test]
    fn rejects_foreign_accounts() {
        let mut data = encoded(&PoolState::default());
        data[0] ^= 0xff;
        assert!(PoolState::decode(&data).is_err());
        assert!(PoolState::decode(&[1, 2, 3]).is_err());
    }

    #[test]
    fn guard_refuses_nested_entry() {
        let mut config = SwapperConfig::default();
        config.enter().unwrap();
        assert!(config.enter().is_err());
        config.leave();
        assert!(config.enter().is_ok());
    }

    #[test]
    fn discriminator_matches_account_name() {
        let digest = anchor_lang::solana_program::hash::hash(b"account:LiquidityPool");
        assert_eq!(digest.to_bytes()[..8], PoolState::DISCRIMINATOR);
    }
}
