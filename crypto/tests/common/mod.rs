#![allow(dead_code)]

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use zen_crypto::KeyProvider;
use zen_crypto::PasswordHasher;
use zen_crypto::RsaKeyPair;
use zen_crypto::TokenProvider;

pub const PRIVATE_PEM: &[u8] = include_bytes!("../fixtures/private.pem");
pub const PUBLIC_PEM: &[u8] = include_bytes!("../fixtures/public.pem");
pub const OTHER_PRIVATE_PEM: &[u8] = include_bytes!("../fixtures/other_private.pem");
pub const OTHER_PUBLIC_PEM: &[u8] = include_bytes!("../fixtures/other_public.pem");

/// Absolute path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Keypair parsed from the checked-in fixtures
pub fn fixture_keys() -> Arc<dyn KeyProvider> {
    Arc::new(RsaKeyPair::from_pem(PRIVATE_PEM, PUBLIC_PEM).expect("Failed to parse fixture keys"))
}

/// Key provider that signs with one keypair and verifies with another
pub struct MismatchedKeys {
    pub private_key: EncodingKey,
    pub public_key: DecodingKey,
}

impl MismatchedKeys {
    pub fn new() -> Self {
        Self {
            private_key: EncodingKey::from_rsa_pem(PRIVATE_PEM).unwrap(),
            public_key: DecodingKey::from_rsa_pem(OTHER_PUBLIC_PEM).unwrap(),
        }
    }
}

impl KeyProvider for MismatchedKeys {
    fn private_key(&self) -> Option<&EncodingKey> {
        Some(&self.private_key)
    }

    fn public_key(&self) -> Option<&DecodingKey> {
        Some(&self.public_key)
    }
}

pub fn token_provider(keys: Arc<dyn KeyProvider>) -> TokenProvider {
    TokenProvider::new(
        "svc",
        "user-1",
        vec!["api".to_string()],
        Duration::hours(1),
        keys,
    )
}

/// Hasher with low costs so the suite stays fast
pub fn cheap_hasher(pepper: &str) -> PasswordHasher {
    PasswordHasher::new(pepper, 4096, 1, 16, 32, 1)
}
