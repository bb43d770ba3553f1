use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::EscrowError;
use crate::oracle::{FeedFreshness, PriceReading};

/// Which side of `unlock_price` the feed price must reach before funds move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockDirection {
    RisesAbove,
    FallsToOrBelow,
}

impl UnlockDirection {
    pub fn is_met(&self, price: i64, unlock_price: i64) -> bool {
        match self {
            UnlockDirection::RisesAbove => price > unlock_price,
            UnlockDirection::FallsToOrBelow => price <= unlock_price,
        }
    }
}

/// Upper bound on the oracle confidence interval a withdraw will accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfidenceBound {
    Unbounded,
    BoundedBy(u64),
}

impl From<Option<u64>> for ConfidenceBound {
    fn from(max: Option<u64>) -> Self {
        match max {
            Some(max) => ConfidenceBound::BoundedBy(max),
            None => ConfidenceBound::Unbounded,
        }
    }
}

impl ConfidenceBound {
    pub fn admits(&self, confidence: u64) -> bool {
        match self {
            ConfidenceBound::Unbounded => true,
            ConfidenceBound::BoundedBy(max) => confidence <= *max,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseReason {
    PriceCondition,
    // The feed stopped publishing, so the owner may recover funds unconditionally
    FeedAbandoned,
}

/// Decide whether an escrow locked at `unlock_price` may be released given the
/// oracle reading observed at execution time `now`.
pub fn evaluate_release(
    unlock_price: i64,
    reading: &PriceReading,
    bound: ConfidenceBound,
    now: i64,
) -> Result<ReleaseReason> {
    // A supplied bound holds on every path, including the abandoned-feed escape
    if !bound.admits(reading.confidence) {
        msg!(
            "Confidence {} exceeds bound {:?}",
            reading.confidence,
            bound
        );
        return err!(EscrowError::ConfidenceIntervalExceeded);
    }

    match reading.freshness(now) {
        FeedFreshness::Abandoned => {
            msg!(
                "Feed last published at {}, releasing without price check",
                reading.publish_time
            );
            return Ok(ReleaseReason::FeedAbandoned);
        }
        FeedFreshness::Stale => return err!(EscrowError::StaleFeed),
        FeedFreshness::Fresh => {}
    }

    require!(reading.price > 0, EscrowError::FeedUnavailable);

    msg!("Current feed price is {}", reading.price);
    msg!("Unlock price is {}", unlock_price);
    require!(
        UNLOCK_DIRECTION.is_met(reading.price, unlock_price),
        EscrowError::PriceConditionUnmet
    );

    Ok(ReleaseReason::PriceCondition)
}
