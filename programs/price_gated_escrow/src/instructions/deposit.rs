use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::*;
use crate::errors::EscrowError;
use crate::events::DepositEvent;
use crate::state::*;

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    // init fails if the owner already has a live escrow at this address
    #[account(
        init,
        payer = user,
        space = EscrowState::SPACE,
        seeds = [ESCROW_SEED, user.key().as_ref()],
        bump
    )]
    pub escrow_account: Account<'info, EscrowState>,

    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn deposit(&mut self, amount: u64, unlock_price: i64, bumps: &DepositBumps) -> Result<()> {
        let state = EscrowState::open(
            self.user.key(),
            amount,
            unlock_price,
            bumps.escrow_account,
        )?;

        // Rent for the escrow account was already taken by init
        require!(
            self.user.lamports() >= amount,
            EscrowError::InsufficientFunds
        );

        transfer(
            CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.user.to_account_info(),
                    to: self.escrow_account.to_account_info(),
                },
            ),
            amount,
        )?;

        self.escrow_account.set_inner(state);

        msg!(
            "Locked {} lamports for {} until price passes {}",
            amount,
            self.user.key(),
            unlock_price
        );

        emit!(DepositEvent {
            owner: self.user.key(),
            escrow: self.escrow_account.key(),
            amount,
            unlock_price,
        });

        Ok(())
    }
}
