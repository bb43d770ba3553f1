use anchor_lang::prelude::*;

use crate::release::ReleaseReason;

#[event]
pub struct DepositEvent {
    pub owner: Pubkey,
    pub escrow: Pubkey,
    pub amount: u64,
    pub unlock_price: i64,
}

#[event]
pub struct WithdrawEvent {
    pub owner: Pubkey,
    pub escrow: Pubkey,
    pub amount: u64,
    pub unlock_price: i64,
    pub price: i64,
    pub reason: ReleaseReason,
}
