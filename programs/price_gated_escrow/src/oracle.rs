use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::{Price, PriceUpdateV2, VerificationLevel};

use crate::constants::*;
use crate::errors::EscrowError;

/// Oracle observation rescaled to `PRICE_DECIMALS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceReading {
    pub price: i64,
    pub confidence: u64,
    pub publish_time: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedFreshness {
    Fresh,
    Stale,
    Abandoned,
}

impl PriceReading {
    /// Read the latest price for `feed_id` from a fully verified update.
    /// Staleness is left to `freshness` so an abandoned feed can still be told apart.
    pub fn load(update: &PriceUpdateV2, feed_id: &[u8; 32]) -> Result<Self> {
        require!(
            matches!(update.verification_level, VerificationLevel::Full),
            EscrowError::FeedMismatch
        );
        let price = update
            .get_price_unchecked(feed_id)
            .map_err(|_| error!(EscrowError::FeedMismatch))?;

        Self::from_pyth(&price)
    }

    /// Non-positive prices pass through; `evaluate_release` rejects them only
    /// while the feed is still live.
    pub fn from_pyth(price: &Price) -> Result<Self> {
        let normalized = rescale(price.price as i128, price.exponent, PRICE_DECIMALS)?;
        let confidence = rescale(price.conf as i128, price.exponent, PRICE_DECIMALS)?;

        Ok(Self {
            price: i64::try_from(normalized).map_err(|_| error!(EscrowError::MathOverflow))?,
            confidence: u64::try_from(confidence).map_err(|_| error!(EscrowError::MathOverflow))?,
            publish_time: price.publish_time,
        })
    }

    pub fn freshness(&self, now: i64) -> FeedFreshness {
        // Clock skew can put publish_time slightly ahead of now
        let age = now.saturating_sub(self.publish_time);
        if age > ABANDONED_FEED_AGE {
            FeedFreshness::Abandoned
        } else if age > MAX_PRICE_AGE as i64 {
            FeedFreshness::Stale
        } else {
            FeedFreshness::Fresh
        }
    }
}

// Pyth exponents are usually negative: exponent = -8 means 8 decimal places.
// Digits past target_decimals are truncated.
pub fn rescale(value: i128, exponent: i32, target_decimals: u8) -> Result<i128> {
    let shift = exponent
        .checked_add(target_decimals as i32)
        .ok_or(EscrowError::MathOverflow)?;

    if shift >= 0 {
        let multiplier = 10i128
            .checked_pow(shift as u32)
            .ok_or(EscrowError::MathOverflow)?;
        Ok(value.checked_mul(multiplier).ok_or(EscrowError::MathOverflow)?)
    } else {
        match 10i128.checked_pow(shift.unsigned_abs()) {
            Some(divisor) => Ok(value / divisor),
            // Anything divided by more than i128::MAX rounds to zero
            None => Ok(0),
        }
    }
}
