use thiserror::Error;

/// Error type for token operations.
///
/// `Expired` is kept apart from `Invalid` so callers can ask for a new login
/// instead of rejecting the request outright.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Public key is not available")]
    MissingPublicKey,

    #[error("Unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Time-to-live of {0} seconds is out of range")]
    TimeToLiveOutOfRange(i64),
}
