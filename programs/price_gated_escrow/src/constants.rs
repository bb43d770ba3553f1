use crate::release::UnlockDirection;

pub const ESCROW_SEED: &[u8] = b"price_escrow";

// Message the owner signs off-chain to authorize a release
pub const UNLOCK_MESSAGE: &[u8] = b"release my price gated escrow";

// Oracle settings
pub const SOL_USD_FEED_ID: &str = "0xef0d8b6fda2ceba41da15d4095d1da392a0d2f8ed0c6c7bc0f4cfac8c280b56d";
pub const PRICE_DECIMALS: u8 = 6; // unlock_price and confidence bounds use 6 decimals
pub const MAX_PRICE_AGE: u64 = 300; // 5 minutes
pub const ABANDONED_FEED_AGE: i64 = 86_400; // 24 hours without an update

// Release when the feed price is strictly above the depositor's unlock price
pub const UNLOCK_DIRECTION: UnlockDirection = UnlockDirection::RisesAbove;
