//! Token issuing for lectern sessions.
//!
//! Access tokens are short-lived HS256 JWTs naming the user and their role.
//! Refresh tokens are opaque; the session table keeps only their SHA-256.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::env_or;

/// `iss` claim of every access token this server signs.
pub const TOKEN_ISSUER: &str = "lectern";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: DbId,
    /// `student`, `instructor` or `admin`.
    pub role: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET` (required), `JWT_ACCESS_EXPIRY_MINS` (default 15)
    /// and `JWT_REFRESH_EXPIRY_DAYS` (default 7).
    ///
    /// # Panics
    ///
    /// Panics if the secret is missing or blank, or an expiry is not a number.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.trim().is_empty(), "JWT_SECRET must be set");

        Self {
            secret,
            access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_or("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    /// Access-token lifetime as reported to clients in `expiresIn`.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    pub fn refresh_expires_at(&self) -> Timestamp {
        Utc::now() + Duration::days(self.refresh_token_expiry_days)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default();
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation
    }
}

pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_owned(),
        iss: TOKEN_ISSUER.to_owned(),
        exp: now + config.access_ttl_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, expiry and issuer.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )
    .map(|data| data.claims)
}

/// A freshly minted refresh token. `plaintext` goes to the client once.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let hash = hash_refresh_token(&plaintext);
        Self { plaintext, hash }
    }
}

pub fn hash_refresh_token(token: &str) -> String {
    hex_digest(Sha256::digest(token.as_bytes()).as_slice())
}

fn hex_digest(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "lectern-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_carries_user_and_role() {
        let token = generate_access_token(42, "instructor", &config()).unwrap();

        let claims = validate_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "instructor");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, config().access_ttl_secs());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: "student".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            // Past the default 60 second leeway.
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = sign(&claims, &config().secret);
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: "admin".to_string(),
            iss: "someone-else".to_string(),
            exp: now + 600,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };
        let token = sign(&claims, &config().secret);
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            ..config()
        };
        let token = generate_access_token(1, "student", &other).unwrap();
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn refresh_tokens_are_unique_and_hash_stably() {
        let a = RefreshToken::generate();
        let b = RefreshToken::generate();
        assert_ne!(a.plaintext, b.plaintext);
        assert_eq!(hash_refresh_token(&a.plaintext), a.hash);
        assert_eq!(a.hash.len(), 64);
    }

    #[test]
    fn refresh_expiry_is_days_ahead() {
        let remaining = config().refresh_expires_at() - Utc::now();
        assert!(remaining > Duration::days(6));
        assert!(remaining <= Duration::days(7));
    }
}
