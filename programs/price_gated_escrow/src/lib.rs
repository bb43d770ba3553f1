#![allow(unexpected_cfgs, deprecated)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod oracle;
pub mod release;
pub mod signature;
pub mod state;

use instructions::*;
use state::*;

declare_id!("96sL7bT5pKY7arhBsar7nz3CqavxSncAARypWpQW9iRp");

#[program]
pub mod price_gated_escrow {
    use super::*;

    // Lock `amount` lamports until the oracle price satisfies `unlock_price`
    pub fn deposit(ctx: Context<Deposit>, amount: u64, unlock_price: i64) -> Result<()> {
        ctx.accounts.deposit(amount, unlock_price, &ctx.bumps)
    }

    // Must be preceded by an ed25519 verification of UNLOCK_MESSAGE by the owner
    pub fn withdraw(ctx: Context<Withdraw>, params: WithdrawParams) -> Result<()> {
        ctx.accounts.withdraw(params)
    }
}
