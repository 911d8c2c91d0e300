use anchor_lang::prelude::*;

#[event]
pub struct SwapRouted {
    pub caller: Pubkey,
    pub recipient: Pubkey,
    pub token_out: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub refunded: u64,
}

#[event]
pub struct LiquidityZapped {
    pub caller: Pubkey,
    pub recipient: Pubkey,
    pub token_out: Pubkey,
    pub amount_out: u64,
    pub amount_in_swap: u64,
    pub amount_in_add_liquidity: u64,
    pub refunded: u64,
}
