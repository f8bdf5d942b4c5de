use std::fmt;

use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use subtle::ConstantTimeEq;

use super::encoded::EncodedHash;
use super::encoded::ARGON2_VERSION;
use super::encoded::MAX_ITERATIONS;
use super::encoded::MAX_MEMORY;
use super::encoded::MAX_PARALLELISM;
use super::errors::PasswordError;
use crate::config::PasswordConfig;
use crate::random::generate_random_bytes;

/// Peppered Argon2id password hasher.
///
/// The pepper is appended to every plaintext before hashing and is never
/// written into the encoded hash, so it has to be supplied again (through the
/// same configuration) to verify.
#[derive(Clone)]
pub struct PasswordHasher {
    pepper: String,
    memory: u32,
    iterations: u32,
    parallelism: u32,
    salt_length: u32,
    key_length: u32,
}

impl PasswordHasher {
    /// Create a new password hasher.
    ///
    /// # Arguments
    /// * `pepper` - Process-wide secret appended to every plaintext
    /// * `memory` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `salt_length` - Salt size in bytes
    /// * `key_length` - Output hash size in bytes
    /// * `parallelism` - Degree of parallelism
    ///
    /// Parameters are not range-checked here; Argon2 rejects out-of-range
    /// values when hashing, surfacing as `HashingFailed`.
    pub fn new(
        pepper: impl Into<String>,
        memory: u32,
        iterations: u32,
        salt_length: u32,
        key_length: u32,
        parallelism: u32,
    ) -> Self {
        Self {
            pepper: pepper.into(),
            memory,
            iterations,
            parallelism,
            salt_length,
            key_length,
        }
    }

    /// Create a hasher from the `password` configuration section.
    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(
            config.pepper.clone(),
            config.argon2.memory,
            config.argon2.iterations,
            config.argon2.salt_length,
            config.argon2.key_length,
            config.argon2.parallelism,
        )
    }

    /// Hash a plaintext with a fresh random salt.
    ///
    /// # Returns
    /// Encoded hash string ready for storage
    ///
    /// # Errors
    /// * `RandomSource` - Salt could not be drawn
    /// * `HashingFailed` - Argon2 rejected the configured parameters
    pub fn generate(&self, plaintext: &[u8]) -> Result<String, PasswordError> {
        let salt = generate_random_bytes(self.salt_length)?;
        let encoded = self.hash_with_salt(plaintext, &salt)?;

        Ok(encoded.to_string())
    }

    /// Hash a plaintext with a caller-supplied salt.
    ///
    /// Deterministic for a given salt; `generate` should be preferred for
    /// anything that gets stored.
    ///
    /// # Errors
    /// * `HashingFailed` - Parameters are rejected by Argon2 or exceed the
    ///   bounds a stored hash may carry
    pub fn hash_with_salt(
        &self,
        plaintext: &[u8],
        salt: &[u8],
    ) -> Result<EncodedHash, PasswordError> {
        if self.memory > MAX_MEMORY
            || self.iterations > MAX_ITERATIONS
            || self.parallelism > MAX_PARALLELISM
        {
            return Err(PasswordError::HashingFailed(
                "cost parameters exceed the accepted maximum".to_string(),
            ));
        }

        let hash = self.derive(
            plaintext,
            salt,
            self.memory,
            self.iterations,
            self.parallelism,
            self.key_length as usize,
        )?;

        Ok(EncodedHash {
            version: ARGON2_VERSION,
            memory: self.memory,
            iterations: self.iterations,
            parallelism: self.parallelism,
            salt: salt.to_vec(),
            hash,
        })
    }

    /// Verify a plaintext against a stored hash.
    ///
    /// The cost parameters embedded in `encoded` are used, not the ones this
    /// hasher was configured with, so hashes created under older settings
    /// keep verifying.
    ///
    /// # Returns
    /// True if the plaintext matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidHashFormat` - Stored hash is not in the expected format
    /// * `IncompatibleVersion` - Stored hash uses another Argon2 version
    /// * `Decode` - Salt or hash field is not valid base64
    /// * `HashingFailed` - Stored parameters are rejected by Argon2
    pub fn verify(&self, plaintext: &[u8], encoded: &str) -> Result<bool, PasswordError> {
        let parsed: EncodedHash = encoded.parse().map_err(|e: PasswordError| {
            tracing::debug!(error = %e, "Rejected stored password hash");
            e
        })?;

        self.verify_encoded(plaintext, &parsed)
    }

    /// Verify a plaintext against an already parsed hash.
    pub fn verify_encoded(
        &self,
        plaintext: &[u8],
        encoded: &EncodedHash,
    ) -> Result<bool, PasswordError> {
        let candidate = self.derive(
            plaintext,
            &encoded.salt,
            encoded.memory,
            encoded.iterations,
            encoded.parallelism,
            encoded.key_length(),
        )?;

        Ok(candidate.ct_eq(&encoded.hash).into())
    }

    fn derive(
        &self,
        plaintext: &[u8],
        salt: &[u8],
        memory: u32,
        iterations: u32,
        parallelism: u32,
        key_length: usize,
    ) -> Result<Vec<u8>, PasswordError> {
        let params = Params::new(memory, iterations, parallelism, Some(key_length))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        // plaintext first, pepper appended
        let mut peppered = Vec::with_capacity(plaintext.len() + self.pepper.len());
        peppered.extend_from_slice(plaintext);
        peppered.extend_from_slice(self.pepper.as_bytes());

        let mut output = vec![0u8; key_length];
        argon2
            .hash_password_into(&peppered, salt, &mut output)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(output)
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("pepper", &"<redacted>")
            .field("memory", &self.memory)
            .field("iterations", &self.iterations)
            .field("parallelism", &self.parallelism)
            .field("salt_length", &self.salt_length)
            .field("key_length", &self.key_length)
            .finish()
    }
}
