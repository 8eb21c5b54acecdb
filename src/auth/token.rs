use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{AuthError, Claims, Role};
use crate::config::{SecurityConfig, MAX_JWT_EXPIRY_HOURS};

/// Signs and verifies HS256 access tokens with a single shared secret.
///
/// The codec is built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Config("JWT secret is not configured".to_string()));
        }
        if secret.len() < 32 {
            tracing::warn!("JWT secret is shorter than recommended (32 bytes)");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // exp must be strictly in the future, no clock skew allowance
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, AuthError> {
        let hours = security.jwt_expiry_hours;
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&hours) {
            return Err(AuthError::Config(format!("token lifetime of {} hours is out of range", hours)));
        }
        Self::new(&security.jwt_secret, Duration::hours(hours as i64))
    }

    /// Lifetime given to every issued token.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: i32, email: &str, role: Role) -> Result<String, AuthError> {
        self.issue_at(user_id, email, role, Utc::now())
    }

    pub fn issue_at(&self, user_id: i32, email: &str, role: Role, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, email, role, issued_at, self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Decodes a token, checking signature and expiry.
    ///
    /// Malformed, mis-signed and expired tokens all yield the same
    /// `InvalidToken`; the cause is only visible in debug logs.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Duration::hours(24)).unwrap()
    }

    #[test]
    fn issued_token_verifies_to_same_identity() {
        let codec = codec();
        let token = codec.issue(1, "alice@example.com", Role::User).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn token_has_three_segments() {
        let token = codec().issue(3, "c@example.com", Role::Admin).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let issued_at = Utc::now() - Duration::hours(25);
        let token = codec.issue_at(1, "alice@example.com", Role::User, issued_at).unwrap();

        assert!(matches!(codec.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenCodec::new("a-completely-different-signing-secret!!", Duration::hours(24)).unwrap();
        let token = other.issue(1, "alice@example.com", Role::Admin).unwrap();

        assert!(matches!(codec().verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        let codec = codec();
        for token in ["", "abc", "a.b.c", "Bearer x"] {
            assert!(matches!(codec.verify(token), Err(AuthError::InvalidToken)), "accepted {token:?}");
        }
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let codec = codec();
        let token = codec.issue(1, "alice@example.com", Role::User).unwrap();
        let admin = codec.issue(1, "alice@example.com", Role::Admin).unwrap();

        // Splice the admin payload onto the user signature
        let parts: Vec<&str> = token.split('.').collect();
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], admin_parts[1], parts[2]);

        assert!(matches!(codec.verify(&forged), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn oversized_lifetime_is_a_configuration_error() {
        let mut security = crate::testing::security_config();
        security.jwt_expiry_hours = u64::MAX;
        assert!(matches!(TokenCodec::from_config(&security), Err(AuthError::Config(_))));

        security.jwt_expiry_hours = 24;
        assert_eq!(TokenCodec::from_config(&security).unwrap().ttl(), Duration::hours(24));
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        assert!(matches!(
            TokenCodec::new("", Duration::hours(24)),
            Err(AuthError::Config(_))
        ));
    }
}
