use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;

use crate::constants::*;
use crate::errors::EscrowError;
use crate::oracle::PriceReading;
use crate::release::{evaluate_release, ConfidenceBound, ReleaseReason};
use crate::signature::verify_proof;

#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct EscrowState {
    pub owner: Pubkey,
    pub escrow_amount: u64,
    pub unlock_price: i64,
    pub bump: u8,
}

impl EscrowState {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn open(owner: Pubkey, amount: u64, unlock_price: i64, bump: u8) -> Result<Self> {
        require!(amount > 0, EscrowError::InvalidAmount);

        Ok(Self {
            owner,
            escrow_amount: amount,
            unlock_price,
            bump,
        })
    }

    pub fn find_address(owner: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[ESCROW_SEED, owner.as_ref()], &crate::ID)
    }

    /// The release must be authorized by an ed25519 proof over `UNLOCK_MESSAGE`
    /// from the owner, placed immediately before the withdraw.
    pub fn verify_release_proof(&self, previous: Option<&Instruction>) -> Result<()> {
        verify_proof(previous, &self.owner, UNLOCK_MESSAGE)
    }

    pub fn release_reason(
        &self,
        reading: &PriceReading,
        bound: ConfidenceBound,
        now: i64,
    ) -> Result<ReleaseReason> {
        evaluate_release(self.unlock_price, reading, bound, now)
    }
}

#[derive(Clone, Debug, AnchorSerialize, AnchorDeserialize)]
pub struct WithdrawParams {
    pub max_confidence_interval: Option<u64>,
}

impl WithdrawParams {
    pub fn confidence_bound(&self) -> ConfidenceBound {
        self.max_confidence_interval.into()
    }
}
