//! Bearer token issuing and verification.
//!
//! Access tokens are HS256-signed JWTs carrying a subject and a single role.
//! Mutating catalogue routes require [`ROLE_ADMIN`]; reads accept any role.

use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

/// Role allowed to create, update and delete catalogue records.
pub const ROLE_ADMIN: &str = "admin";

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject, usually a user name or service id.
    pub sub: String,
    pub role: String,
    /// Issued-at (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration (UTC Unix timestamp).
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token lifetime out of range")]
    Lifetime,
}

/// Signs and validates access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `subject` with `role`, valid for `ttl`.
    pub fn issue(&self, subject: &str, role: &str, ttl: Duration) -> Result<String, TokenError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let ttl = i64::try_from(ttl.as_secs()).map_err(|_| TokenError::Lifetime)?;
        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now.checked_add(ttl).ok_or(TokenError::Lifetime)?,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Validate signature and expiry and return the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(TokenError::Invalid)?;
        tracing::trace!(sub = %data.claims.sub, role = %data.claims.role, "token verified");
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn issued_token_verifies() {
        let verifier = TokenVerifier::new("test-secret");
        let token = verifier.issue("alice", ROLE_ADMIN, HOUR).unwrap();

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.is_admin());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = TokenVerifier::new("secret-a");
        let verifier = TokenVerifier::new("secret-b");
        let token = issuer.issue("mallory", ROLE_ADMIN, HOUR).unwrap();

        assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = TokenVerifier::new("test-secret");
        let token = verifier.issue("bob", "reader", Duration::ZERO).unwrap();
        std::thread::sleep(Duration::from_millis(1100));

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let verifier = TokenVerifier::new("test-secret");
        assert!(verifier.verify("not-a-jwt").is_err());
    }
}
