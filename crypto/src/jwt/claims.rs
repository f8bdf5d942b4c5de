use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Registered JWT claims carried by every issued token.
///
/// Times are Unix timestamps in seconds. A single audience is written as a
/// bare string and several as an array; both forms are accepted on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// JWT ID (unique token identifier)
    pub jti: String,

    /// Issuer
    pub iss: String,

    /// Subject (user/entity identifier)
    pub sub: String,

    /// Audience
    #[serde(default, with = "audience")]
    pub aud: Vec<String>,

    /// Issued at
    pub iat: i64,

    /// Not before
    pub nbf: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Build a fresh claim set starting now.
    ///
    /// # Arguments
    /// * `issuer` - Token issuer
    /// * `subject` - Token subject
    /// * `audience` - Intended recipients
    /// * `time_to_live` - Offset from now to expiration
    ///
    /// # Returns
    /// Claims with a new random `jti` and `iat == nbf == now`
    ///
    /// # Errors
    /// * `Signing` - `now + time_to_live` is outside the representable range
    pub fn new(
        issuer: impl ToString,
        subject: impl ToString,
        audience: Vec<String>,
        time_to_live: Duration,
    ) -> Result<Self, TokenError> {
        let now = Utc::now();
        let expiration = now.checked_add_signed(time_to_live).ok_or_else(|| {
            TokenError::Signing("expiration time is out of range".to_string())
        })?;

        Ok(Self {
            jti: Uuid::new_v4().to_string(),
            iss: issuer.to_string(),
            sub: subject.to_string(),
            aud: audience,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.nbf, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

mod audience {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serialize;
    use serde::Serializer;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub fn serialize<S: Serializer>(audience: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        match audience {
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(single) => vec![single],
            OneOrMany::Many(many) => many,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims =
            Claims::new("svc", "user-1", vec!["api".to_string()], Duration::hours(1)).unwrap();

        assert_eq!(claims.iss, "svc");
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.aud, vec!["api"]);
        assert_eq!(claims.iat, claims.nbf);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_fresh_identifier_per_claim_set() {
        let first = Claims::new("svc", "user-1", vec![], Duration::minutes(5)).unwrap();
        let second = Claims::new("svc", "user-1", vec![], Duration::minutes(5)).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_out_of_range_time_to_live() {
        let result = Claims::new("svc", "user-1", vec![], Duration::MAX);
        assert!(matches!(result, Err(TokenError::Signing(_))));

        let result = Claims::new("svc", "user-1", vec![], Duration::MIN);
        assert!(matches!(result, Err(TokenError::Signing(_))));
    }

    #[test]
    fn test_time_accessors() {
        let claims = Claims::new("svc", "user-1", vec![], Duration::hours(2)).unwrap();

        let issued = claims.issued_at().unwrap();
        let expires = claims.expires_at().unwrap();
        assert_eq!(expires - issued, Duration::hours(2));
        assert_eq!(claims.not_before(), claims.issued_at());
    }

    #[test]
    fn test_is_expired() {
        let mut claims = Claims::new("svc", "user-1", vec![], Duration::hours(1)).unwrap();
        claims.exp = 1000;

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_single_audience_serializes_as_string() {
        let claims =
            Claims::new("svc", "user-1", vec!["api".to_string()], Duration::hours(1)).unwrap();
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["aud"], serde_json::json!("api"));
    }

    #[test]
    fn test_multiple_audiences_serialize_as_array() {
        let audience = vec!["api".to_string(), "admin".to_string()];
        let claims = Claims::new("svc", "user-1", audience, Duration::hours(1)).unwrap();
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["aud"], serde_json::json!(["api", "admin"]));
    }

    #[test]
    fn test_audience_accepts_both_forms() {
        let single: Claims = serde_json::from_str(
            r#"{"jti":"1","iss":"svc","sub":"u","aud":"api","iat":1,"nbf":1,"exp":2}"#,
        )
        .unwrap();
        let many: Claims = serde_json::from_str(
            r#"{"jti":"1","iss":"svc","sub":"u","aud":["api","web"],"iat":1,"nbf":1,"exp":2}"#,
        )
        .unwrap();
        let missing: Claims =
            serde_json::from_str(r#"{"jti":"1","iss":"svc","sub":"u","iat":1,"nbf":1,"exp":2}"#)
                .unwrap();

        assert_eq!(single.aud, vec!["api"]);
        assert_eq!(many.aud, vec!["api", "web"]);
        assert!(missing.aud.is_empty());
    }
}
