use std::fs;
use std::path::Path;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::KeyError;
use crate::config::JwtConfig;

/// Source of the signing and verification keys used by the token provider.
///
/// Implemented by `RsaKeyPair` for keys loaded from PEM files; tests
/// substitute in-memory implementations. Either key may be absent, in which
/// case signing or verification fails with a typed error.
pub trait KeyProvider: Send + Sync {
    /// Key used only for signing.
    fn private_key(&self) -> Option<&EncodingKey>;

    /// Key used only for verifying.
    fn public_key(&self) -> Option<&DecodingKey>;
}

/// RSA keypair loaded once and held immutably for the process lifetime.
#[derive(Clone)]
pub struct RsaKeyPair {
    private_key: EncodingKey,
    public_key: DecodingKey,
}

impl RsaKeyPair {
    /// Load a keypair from two PEM files.
    ///
    /// # Arguments
    /// * `private_key_path` - PEM-encoded RSA private key (PKCS#1 or PKCS#8)
    /// * `public_key_path` - PEM-encoded RSA public key
    ///
    /// # Errors
    /// * `FileRead` - Either file could not be read
    /// * `Parse` - Either file is not a PEM-encoded RSA key
    pub fn load(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, KeyError> {
        let private_pem = read_key_file(private_key_path.as_ref())?;
        let public_pem = read_key_file(public_key_path.as_ref())?;

        let keys = Self::from_pem(&private_pem, &public_pem)?;

        tracing::info!(
            private_key_path = %private_key_path.as_ref().display(),
            public_key_path = %public_key_path.as_ref().display(),
            "RSA keypair loaded"
        );

        Ok(keys)
    }

    /// Load the keypair named by the `jwt` configuration section.
    pub fn from_config(config: &JwtConfig) -> Result<Self, KeyError> {
        Self::load(&config.private_key_path, &config.public_key_path)
    }

    /// Build a keypair from in-memory PEM material.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyError> {
        let private_key = EncodingKey::from_rsa_pem(private_pem).map_err(|e| KeyError::Parse {
            kind: "private",
            reason: e.to_string(),
        })?;

        let public_key = DecodingKey::from_rsa_pem(public_pem).map_err(|e| KeyError::Parse {
            kind: "public",
            reason: e.to_string(),
        })?;

        Ok(Self {
            private_key,
            public_key,
        })
    }
}

impl KeyProvider for RsaKeyPair {
    fn private_key(&self) -> Option<&EncodingKey> {
        Some(&self.private_key)
    }

    fn public_key(&self) -> Option<&DecodingKey> {
        Some(&self.public_key)
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyError> {
    fs::read(path).map_err(|e| KeyError::FileRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
