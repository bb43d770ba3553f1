use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;
use pyth_solana_receiver_sdk::price_update::{get_feed_id_from_hex, PriceUpdateV2};

use crate::constants::*;
use crate::errors::EscrowError;
use crate::events::WithdrawEvent;
use crate::oracle::PriceReading;
use crate::signature::load_preceding_instruction;
use crate::state::*;

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, user.key().as_ref()],
        bump = escrow_account.bump,
        constraint = escrow_account.owner == user.key() @ EscrowError::OwnerMismatch,
        close = user
    )]
    pub escrow_account: Account<'info, EscrowState>,

    pub price_update: Account<'info, PriceUpdateV2>,

    /// CHECK: address is constrained to the instructions sysvar
    #[account(address = sysvar::instructions::ID)]
    pub instructions: UncheckedAccount<'info>,
}

impl<'info> Withdraw<'info> {
    pub fn withdraw(&mut self, params: WithdrawParams) -> Result<()> {
        let previous = load_preceding_instruction(&self.instructions.to_account_info())?;
        self.escrow_account.verify_release_proof(previous.as_ref())?;

        let feed_id = get_feed_id_from_hex(SOL_USD_FEED_ID)?;
        let reading = PriceReading::load(&self.price_update, &feed_id)?;

        let now = Clock::get()?.unix_timestamp;
        let reason = self
            .escrow_account
            .release_reason(&reading, params.confidence_bound(), now)?;

        // close = user moves the locked amount and the rent reserve back to the owner
        msg!(
            "Releasing {} lamports to {} ({:?})",
            self.escrow_account.escrow_amount,
            self.user.key(),
            reason
        );

        emit!(WithdrawEvent {
            owner: self.user.key(),
            escrow: self.escrow_account.key(),
            amount: self.escrow_account.escrow_amount,
            unlock_price: self.escrow_account.unlock_price,
            price: reading.price,
            reason,
        });

        Ok(())
    }
}
