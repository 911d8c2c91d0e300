use anchor_lang::prelude::*;

#[error_code]
pub enum SwapperError {
    #[msg("Transaction deadline has passed")]
    DeadlineExpired,

    #[msg("Attached value is less than the required input")]
    InsufficientPayment,

    #[msg("Pool reserves cannot cover the requested output")]
    InsufficientLiquidity,

    #[msg("Token pair must consist of two distinct mints")]
    InvalidPair,

    #[msg("Pool or wrapper rejected a cross-program call")]
    ExternalCallFailure,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Invalid fee configuration")]
    InvalidFeeParameters,

    #[msg("Arithmetic overflow in calculations")]
    MathOverflow,

    #[msg("Pool account does not match the derived pair address")]
    PoolMismatch,

    #[msg("Router is already executing a pipeline")]
    Reentrancy,

    #[msg("Pipeline stage cannot move backwards")]
    InvalidStageTransition,

    #[msg("Liquidity deposit requires the share mint and a share account")]
    MissingLiquidityAccounts,
}
