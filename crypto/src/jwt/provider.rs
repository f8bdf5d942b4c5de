use std::str::FromStr;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::config::JwtConfig;
use crate::key::KeyProvider;

/// Algorithm used to sign every issued token.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// RSA PKCS#1 v1.5 algorithms accepted on verification.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

/// Issues and verifies RS256-signed tokens.
///
/// Issuer, subject, audience and time-to-live are fixed per instance; every
/// `generate` call builds a fresh claim set from them. Construction is cheap,
/// so per-subject providers can share one `KeyProvider`.
#[derive(Clone)]
pub struct TokenProvider {
    issuer: String,
    subject: String,
    audience: Vec<String>,
    time_to_live: Duration,
    keys: Arc<dyn KeyProvider>,
}

impl TokenProvider {
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        audience: Vec<String>,
        time_to_live: Duration,
        keys: Arc<dyn KeyProvider>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            subject: subject.into(),
            audience,
            time_to_live,
            keys,
        }
    }

    /// Create a provider from the `jwt` configuration section.
    ///
    /// # Errors
    /// * `TimeToLiveOutOfRange` - `time_to_live_secs` does not fit a `Duration`
    pub fn from_config(
        config: &JwtConfig,
        keys: Arc<dyn KeyProvider>,
    ) -> Result<Self, TokenError> {
        let time_to_live = Duration::try_seconds(config.time_to_live_secs)
            .ok_or(TokenError::TimeToLiveOutOfRange(config.time_to_live_secs))?;

        Ok(Self::new(
            config.issuer.clone(),
            config.subject.clone(),
            config.audience.clone(),
            time_to_live,
            keys,
        ))
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn audience(&self) -> &[String] {
        &self.audience
    }

    pub fn time_to_live(&self) -> Duration {
        self.time_to_live
    }

    pub fn key_provider(&self) -> Arc<dyn KeyProvider> {
        Arc::clone(&self.keys)
    }

    /// Issue a new signed token.
    ///
    /// # Returns
    /// Compact JWT string (`header.payload.signature`)
    ///
    /// # Errors
    /// * `Signing` - Private key is absent, expiration overflows, or the signer failed
    pub fn generate(&self) -> Result<String, TokenError> {
        let claims = Claims::new(
            &self.issuer,
            &self.subject,
            self.audience.clone(),
            self.time_to_live,
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build token claims");
            e
        })?;

        let private_key = self.keys.private_key().ok_or_else(|| {
            tracing::error!("Private key is not available for token signing");
            TokenError::Signing("private key is not available".to_string())
        })?;

        encode(&Header::new(SIGNING_ALGORITHM), &claims, private_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::Signing(e.to_string())
        })
    }

    /// Verify a token and return its claims.
    ///
    /// The declared algorithm is checked before any signature work, so a
    /// token re-labelled with an HMAC or `none` algorithm never reaches the
    /// verifier.
    ///
    /// # Errors
    /// * `MissingPublicKey` - No public key to verify with
    /// * `UnexpectedSigningMethod` - Header declares a non-RSA algorithm
    /// * `Expired` - Signature is valid but `exp` has passed
    /// * `Invalid` - Undecodable token, signature mismatch, immature token, or unexpected claim shape
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let public_key = self.keys.public_key().ok_or_else(|| {
            tracing::error!("Public key is not available for token verification");
            TokenError::MissingPublicKey
        })?;

        let algorithm = declared_rsa_algorithm(token)?;

        let mut validation = Validation::new(algorithm);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.validate_aud = false;

        let token_data = decode::<Claims>(token, public_key, &validation).map_err(|e| {
            if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                tracing::debug!("Rejected expired token");
                TokenError::Expired
            } else {
                tracing::warn!(error = %e, "Rejected invalid token");
                TokenError::Invalid(e.to_string())
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Read the header and return its algorithm if it belongs to the RSA family.
fn declared_rsa_algorithm(token: &str) -> Result<Algorithm, TokenError> {
    match decode_header(token) {
        Ok(header) if ACCEPTED_ALGORITHMS.contains(&header.alg) => Ok(header.alg),
        Ok(header) => {
            tracing::warn!(algorithm = ?header.alg, "Rejected token with unexpected signing method");
            Err(TokenError::UnexpectedSigningMethod(format!("{:?}", header.alg)))
        }
        // jsonwebtoken has no representation for algorithms such as `none`
        Err(e) => match raw_header_algorithm(token) {
            Some(name) if !is_accepted(&name) => {
                tracing::warn!(algorithm = %name, "Rejected token with unexpected signing method");
                Err(TokenError::UnexpectedSigningMethod(name))
            }
            _ => {
                tracing::warn!(error = %e, "Failed to parse token header");
                Err(TokenError::Invalid(e.to_string()))
            }
        },
    }
}

fn raw_header_algorithm(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    let header: serde_json::Value = serde_json::from_slice(&bytes).ok()?;

    header.get("alg")?.as_str().map(str::to_string)
}

fn is_accepted(name: &str) -> bool {
    Algorithm::from_str(name)
        .map(|algorithm| ACCEPTED_ALGORITHMS.contains(&algorithm))
        .unwrap_or(false)
}
