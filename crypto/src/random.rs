use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use thiserror::Error;

/// Error type for entropy source failures.
#[derive(Debug, Clone, Error)]
pub enum RandomError {
    #[error("Failed to generate {requested} random bytes: {reason}")]
    Unavailable { requested: u32, reason: String },
}

/// Draw `n` bytes from the operating system CSPRNG.
///
/// # Errors
/// * `Unavailable` - The entropy source could not supply `n` bytes
pub fn generate_random_bytes(n: u32) -> Result<Vec<u8>, RandomError> {
    let mut bytes = vec![0u8; n as usize];

    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RandomError::Unavailable {
            requested: n,
            reason: e.to_string(),
        })?;

    Ok(bytes)
}
