//! Credential and identity-token core
//!
//! Provides the cryptographic building blocks used by the zen services:
//! - Peppered Argon2id password hashing with a self-describing encoded format
//! - RSA keypair loading from PEM files
//! - RS256 token issuance and verification
//! - Authentication coordination
//!
//! Every component is immutable after construction and safe to share across
//! threads.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use zen_crypto::PasswordHasher;
//!
//! let hasher = PasswordHasher::new("pepper", 1024, 1, 16, 32, 1);
//! let hash = hasher.generate(b"my_password").unwrap();
//! assert!(hash.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
//! assert!(hasher.verify(b"my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```no_run
//! use std::sync::Arc;
//!
//! use chrono::Duration;
//! use zen_crypto::{RsaKeyPair, TokenProvider};
//!
//! let keys = Arc::new(RsaKeyPair::load("keys/private.pem", "keys/public.pem").unwrap());
//! let provider = TokenProvider::new("svc", "user-1", vec!["api".to_string()], Duration::hours(1), keys);
//!
//! let token = provider.generate().unwrap();
//! let claims = provider.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user-1");
//! ```
//!
//! ## Complete Authentication Flow
//! ```no_run
//! use zen_crypto::{Authenticator, Settings};
//!
//! let settings = Settings::load().unwrap();
//! let auth = Authenticator::from_settings(&settings).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod config;
pub mod jwt;
pub mod key;
pub mod password;
pub mod random;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use self::config::Settings;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenProvider;
pub use key::KeyError;
pub use key::KeyProvider;
pub use key::RsaKeyPair;
pub use password::EncodedHash;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use random::RandomError;
