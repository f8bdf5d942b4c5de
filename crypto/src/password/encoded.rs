use std::fmt;
use std::str::FromStr;

use argon2::Version;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;

use super::errors::PasswordError;

/// Algorithm identifier written in the first field of every encoded hash.
pub const ALGORITHM_ID: &str = "argon2id";

/// Argon2 version produced and accepted by this crate (0x13 = 19).
pub const ARGON2_VERSION: u32 = Version::V0x13 as u32;

/// Largest memory cost (KiB) accepted from a stored hash: 1 GiB.
pub const MAX_MEMORY: u32 = 1024 * 1024;

/// Largest pass count accepted from a stored hash.
pub const MAX_ITERATIONS: u32 = 256;

/// Largest lane count accepted from a stored hash.
pub const MAX_PARALLELISM: u32 = 255;

/// Parsed form of a stored password hash.
///
/// Canonical string form:
/// `$argon2id$v=<version>$m=<memory>,t=<iterations>,p=<parallelism>$<salt>$<hash>`
/// where salt and hash are standard base64 without padding.
///
/// The pepper is never part of this record. Salt and key lengths are the
/// decoded byte lengths of the last two fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    pub version: u32,
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

impl EncodedHash {
    pub fn salt_length(&self) -> usize {
        self.salt.len()
    }

    pub fn key_length(&self) -> usize {
        self.hash.len()
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            ALGORITHM_ID,
            self.version,
            self.memory,
            self.iterations,
            self.parallelism,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.hash),
        )
    }
}

impl FromStr for EncodedHash {
    type Err = PasswordError;

    /// Parse a stored hash.
    ///
    /// # Errors
    /// * `InvalidHashFormat` - Wrong field count, unknown algorithm, unreadable numeric
    ///   fields, or cost parameters above `MAX_MEMORY`, `MAX_ITERATIONS` or `MAX_PARALLELISM`
    /// * `IncompatibleVersion` - Version differs from `ARGON2_VERSION`
    /// * `Decode` - Salt or hash field is not valid unpadded base64
    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = encoded.split('$').collect();
        if fields.len() != 6 {
            return Err(PasswordError::InvalidHashFormat(format!(
                "expected 6 '$'-separated fields, found {}",
                fields.len()
            )));
        }

        if !fields[0].is_empty() || fields[1] != ALGORITHM_ID {
            return Err(PasswordError::InvalidHashFormat(
                "unsupported algorithm identifier".to_string(),
            ));
        }

        let version = parse_parameter(fields[2], "v=").ok_or_else(|| {
            PasswordError::InvalidHashFormat("malformed version field".to_string())
        })?;
        if version != ARGON2_VERSION {
            return Err(PasswordError::IncompatibleVersion {
                expected: ARGON2_VERSION,
                found: version,
            });
        }

        let (memory, iterations, parallelism) = parse_cost_parameters(fields[3])
            .ok_or_else(|| {
                PasswordError::InvalidHashFormat("malformed parameter field".to_string())
            })?;

        // Stored rows are untrusted input; bound what verification will allocate
        if memory > MAX_MEMORY || iterations > MAX_ITERATIONS || parallelism > MAX_PARALLELISM {
            return Err(PasswordError::InvalidHashFormat(format!(
                "cost parameters m={},t={},p={} exceed the accepted maximum",
                memory, iterations, parallelism
            )));
        }

        let salt = decode_field(fields[4], "salt")?;
        let hash = decode_field(fields[5], "hash")?;

        Ok(Self {
            version,
            memory,
            iterations,
            parallelism,
            salt,
            hash,
        })
    }
}

fn parse_parameter(field: &str, prefix: &str) -> Option<u32> {
    field.strip_prefix(prefix)?.parse().ok()
}

/// Parse `m=<memory>,t=<iterations>,p=<parallelism>`.
fn parse_cost_parameters(field: &str) -> Option<(u32, u32, u32)> {
    let mut parts = field.split(',');

    let memory = parse_parameter(parts.next()?, "m=")?;
    let iterations = parse_parameter(parts.next()?, "t=")?;
    let parallelism = parse_parameter(parts.next()?, "p=")?;

    if parts.next().is_some() {
        return None;
    }

    Some((memory, iterations, parallelism))
}

fn decode_field(field: &str, name: &'static str) -> Result<Vec<u8>, PasswordError> {
    STANDARD_NO_PAD
        .decode(field)
        .map_err(|e| PasswordError::Decode {
            field: name,
            reason: e.to_string(),
        })
}
