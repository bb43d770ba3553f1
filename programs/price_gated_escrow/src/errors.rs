use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("Deposit amount must be greater than zero")]
    InvalidAmount,

    #[msg("Insufficient funds to cover the deposit")]
    InsufficientFunds,

    #[msg("Escrow account does not belong to the signer")]
    OwnerMismatch,

    #[msg("No signature verification instruction precedes the withdraw")]
    MissingSignatureProof,

    #[msg("Preceding instruction is not an ed25519 signature verification")]
    NotSigVerified,

    #[msg("Malformed ed25519 signature verification data")]
    InvalidSignatureData,

    #[msg("Signature was not produced by the escrow owner")]
    SignerMismatch,

    #[msg("Signed message is not the unlock message")]
    MessageMismatch,

    #[msg("Price update is unverified or for a different feed")]
    FeedMismatch,

    #[msg("Price feed holds no usable value")]
    FeedUnavailable,

    #[msg("Price feed is stale")]
    StaleFeed,

    #[msg("Confidence interval exceeds the requested maximum")]
    ConfidenceIntervalExceeded,

    #[msg("Current price does not satisfy the unlock price")]
    PriceConditionUnmet,

    #[msg("Math overflow")]
    MathOverflow,
}

/// Coarse grouping of failures so clients can decide whether to resubmit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Existence,
    Authorization,
    Oracle,
    Condition,
    Funds,
    Arithmetic,
}

impl EscrowError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EscrowError::OwnerMismatch => ErrorCategory::Existence,
            EscrowError::MissingSignatureProof
            | EscrowError::NotSigVerified
            | EscrowError::InvalidSignatureData
            | EscrowError::SignerMismatch
            | EscrowError::MessageMismatch => ErrorCategory::Authorization,
            EscrowError::FeedMismatch
            | EscrowError::FeedUnavailable
            | EscrowError::StaleFeed
            | EscrowError::ConfidenceIntervalExceeded => ErrorCategory::Oracle,
            EscrowError::PriceConditionUnmet => ErrorCategory::Condition,
            EscrowError::InvalidAmount | EscrowError::InsufficientFunds => ErrorCategory::Funds,
            EscrowError::MathOverflow => ErrorCategory::Arithmetic,
        }
    }

    /// Oracle and condition failures may clear on their own once the feed moves.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Oracle | ErrorCategory::Condition
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_and_condition_failures_are_retryable() {
        assert!(EscrowError::StaleFeed.is_retryable());
        assert!(EscrowError::ConfidenceIntervalExceeded.is_retryable());
        assert!(EscrowError::PriceConditionUnmet.is_retryable());
    }

    #[test]
    fn authorization_and_funds_failures_are_final() {
        assert!(!EscrowError::MissingSignatureProof.is_retryable());
        assert!(!EscrowError::SignerMismatch.is_retryable());
        assert!(!EscrowError::InsufficientFunds.is_retryable());
        assert_eq!(
            EscrowError::MessageMismatch.category(),
            ErrorCategory::Authorization
        );
    }

    #[test]
    fn codes_are_offset_by_anchor() {
        assert_eq!(u32::from(EscrowError::InvalidAmount), 6000);
        assert_eq!(u32::from(EscrowError::PriceConditionUnmet), 6012);
    }
}
