use thiserror::Error;

use crate::random::RandomError;

/// Error type for password operations.
///
/// A password that simply does not match is not an error; `verify` returns
/// `Ok(false)` for that case.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Random salt generation failed: {0}")]
    RandomSource(#[from] RandomError),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hash format: {0}")]
    InvalidHashFormat(String),

    #[error("Incompatible Argon2 version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Failed to decode {field}: {reason}")]
    Decode { field: &'static str, reason: String },
}
