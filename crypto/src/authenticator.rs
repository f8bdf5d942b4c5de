use std::sync::Arc;

use crate::config::Settings;
use crate::jwt::Claims;
use crate::jwt::TokenError;
use crate::jwt::TokenProvider;
use crate::key::KeyError;
use crate::key::RsaKeyPair;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Tokens are issued through a `TokenProvider` built for the authenticated
/// subject; issuer, audience, time-to-live and keys come from the provider
/// this coordinator was configured with.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_provider: TokenProvider,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    #[error("Key error: {0}")]
    KeyError(#[from] KeyError),
}

impl Authenticator {
    pub fn new(password_hasher: PasswordHasher, token_provider: TokenProvider) -> Self {
        Self {
            password_hasher,
            token_provider,
        }
    }

    /// Build an authenticator from loaded settings.
    ///
    /// # Errors
    /// * `KeyError` - Key files named in the `jwt` section could not be loaded
    /// * `TokenError` - Configured time-to-live is out of range
    pub fn from_settings(settings: &Settings) -> Result<Self, AuthenticationError> {
        let keys = Arc::new(RsaKeyPair::from_config(&settings.jwt)?);

        Ok(Self::new(
            PasswordHasher::from_config(&settings.password),
            TokenProvider::from_config(&settings.jwt, keys)?,
        ))
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.generate(password.as_bytes())
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the token is issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be used
    /// * `TokenError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self
            .password_hasher
            .verify(password.as_bytes(), stored_hash)?;

        if !is_valid {
            tracing::info!(subject = %subject, "Authentication rejected");
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_provider_for(subject).generate()?;
        tracing::info!(subject = %subject, "Authentication succeeded");

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token for the configured subject without password verification.
    pub fn generate_token(&self) -> Result<String, TokenError> {
        self.token_provider.generate()
    }

    /// Validate a token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_provider.verify(token)
    }

    fn token_provider_for(&self, subject: &str) -> TokenProvider {
        TokenProvider::new(
            self.token_provider.issuer(),
            subject,
            self.token_provider.audience().to_vec(),
            self.token_provider.time_to_live(),
            self.token_provider.key_provider(),
        )
    }
}
