//! In-memory constant-product pool used to exercise the pipelines.

use super::PoolGateway;
use crate::errors::SwapperError;
use crate::math::{get_amount_out, FeeModel};
use crate::reserves::{ReserveSource, Reserves};
use anchor_lang::prelude::*;
use std::cell::Cell;

pub const CALLER_START: u64 = 1_000_000_000_000;
pub const RECIPIENT_START: u64 = 7;
pub const NOW: i64 = 1_700_000_000;

pub fn code(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        anchor_lang::error::Error::ProgramError(_) => u32::MAX,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintEvent {
    pub token_amount: u64,
    pub native_amount: u64,
    pub shares: u64,
}

pub struct SimulatedPool {
    pub pair: Pubkey,
    pub fee: FeeModel,
    pub now: i64,

    pub native_reserve: u64,
    pub token_reserve: u64,
    pub total_shares: u64,

    pub caller_lamports: u64,
    pub held_lamports: u64,
    pub escrow_native: u64,
    pub escrow_tokens: u64,

    pub recipient_tokens: u64,
    pub recipient_shares: u64,

    /// Extra output paid on every swap, for pools that round in the trader's favour
    pub swap_bonus: u64,

    pub mints: Vec<MintEvent>,
    pub calls: Vec<&'static str>,
    reads: Cell<u32>,
}

impl SimulatedPool {
    pub fn new(native_reserve: u64, token_reserve: u64) -> Self {
        Self {
            pair: Pubkey::new_unique(),
            fee: FeeModel::STANDARD,
            now: NOW,
            native_reserve,
            token_reserve,
            total_shares: integer_sqrt(native_reserve as u128 * token_reserve as u128),
            caller_lamports: CALLER_START,
            held_lamports: 0,
            escrow_native: 0,
            escrow_tokens: 0,
            recipient_tokens: RECIPIENT_START,
            recipient_shares: 0,
            swap_bonus: 0,
            mints: Vec::new(),
            calls: Vec::new(),
            reads: Cell::new(0),
        }
    }

    pub fn assert_no_custody(&self) {
        assert_eq!(self.held_lamports, 0, "router kept native currency");
        assert_eq!(self.escrow_native, 0, "router kept wrapped native");
        assert_eq!(self.escrow_tokens, 0, "router kept output tokens");
    }

    pub fn reserve_reads(&self) -> u32 {
        self.reads.get()
    }
}

fn integer_sqrt(value: u128) -> u64 {
    if value == 0 {
        return 0;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x as u64
}

fn take(balance: &mut u64, amount: u64) -> Result<()> {
    *balance = balance
        .checked_sub(amount)
        .ok_or(error!(SwapperError::ExternalCallFailure))?;
    Ok(())
}

impl ReserveSource for SimulatedPool {
    fn read_reserves(&self, pair: &Pubkey) -> Result<Reserves> {
        require_keys_eq!(*pair, self.pair, SwapperError::PoolMismatch);
        self.reads.set(self.reads.get() + 1);
        Reserves::new(self.native_reserve, self.token_reserve)
    }

    fn fee_model(&self, pair: &Pubkey) -> Result<FeeModel> {
        require_keys_eq!(*pair, self.pair, SwapperError::PoolMismatch);
        Ok(self.fee)
    }
}

impl PoolGateway for SimulatedPool {
    fn now(&self) -> Result<i64> {
        Ok(self.now)
    }

    fn collect(&mut self, value: u64) -> Result<()> {
        self.calls.push("collect");
        take(&mut self.caller_lamports, value)?;
        self.held_lamports += value;
        Ok(())
    }

    fn wrap(&mut self, amount: u64) -> Result<()> {
        self.calls.push("wrap");
        take(&mut self.held_lamports, amount)?;
        self.escrow_native += amount;
        Ok(())
    }

    fn swap(&mut self, amount_in: u64, minimum_out: u64) -> Result<u64> {
        self.calls.push("swap");
        let amount_out =
            get_amount_out(amount_in, self.native_reserve, self.token_reserve, self.fee)?
                .saturating_add(self.swap_bonus)
                .min(self.token_reserve - 1);
        require!(amount_out >= minimum_out, SwapperError::ExternalCallFailure);

        take(&mut self.escrow_native, amount_in)?;
        self.native_reserve += amount_in;
        self.token_reserve -= amount_out;
        self.escrow_tokens += amount_out;
        Ok(amount_out)
    }

    fn deliver(&mut self, amount: u64) -> Result<()> {
        self.calls.push("deliver");
        take(&mut self.escrow_tokens, amount)?;
        self.recipient_tokens += amount;
        Ok(())
    }

    fn deposit(&mut self, token_amount: u64, native_amount: u64) -> Result<()> {
        self.calls.push("deposit");
        take(&mut self.escrow_tokens, token_amount)?;
        take(&mut self.escrow_native, native_amount)?;

        let by_token =
            token_amount as u128 * self.total_shares as u128 / self.token_reserve as u128;
        let by_native =
            native_amount as u128 * self.total_shares as u128 / self.native_reserve as u128;
        let shares = by_token.min(by_native) as u64;
        require!(shares > 0, SwapperError::ExternalCallFailure);

        self.token_reserve += token_amount;
        self.native_reserve += native_amount;
        self.total_shares += shares;
        self.recipient_shares += shares;
        self.mints.push(MintEvent {
            token_amount,
            native_amount,
            shares,
        });
        Ok(())
    }

    fn refund(&mut self, amount: u64) -> Result<()> {
        self.calls.push("refund");
        take(&mut self.held_lamports, amount)?;
        self.caller_lamports += amount;
        Ok(())
    }

    fn settle(&mut self) -> Result<()> {
        self.calls.push("settle");
        self.caller_lamports += self.escrow_native;
        self.escrow_native = 0;
        Ok(())
    }
}
