// JWT token generation and validation service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Default token lifetime: one hour
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

/// Process-wide HMAC signing secret
///
/// Loaded once at startup. `Debug` never prints the value.
#[derive(Clone)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub user_id: String,
    pub email: String,
    pub iat: i64, // issued at timestamp
    pub exp: i64, // expiration timestamp
}

/// Token service for JWT operations
///
/// Tokens are stateless: validity is decided by the HS256 signature and the
/// `exp` claim alone.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a new TokenService with the default one hour lifetime
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL_SECONDS)
    }

    pub fn with_ttl(secret: &SigningSecret, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by validate_at against its own clock, with no leeway.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    /// Issue a token for a subject using the configured lifetime
    pub fn issue(&self, user_id: &str, email: &str) -> Result<String, AuthError> {
        self.issue_with_ttl(user_id, email, self.ttl_seconds)
    }

    /// Issue a token that expires `ttl_seconds` from now
    pub fn issue_with_ttl(
        &self,
        user_id: &str,
        email: &str,
        ttl_seconds: u64,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(ttl_seconds)
            .map_err(|_| AuthError::TokenGeneration("token lifetime out of range".to_string()))?;

        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Validate a token against the wall clock
    pub fn validate(&self, token: &str) -> Option<Claims> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token as of `now` (unix seconds)
    ///
    /// Malformed, tampered, and expired tokens all yield `None`.
    pub fn validate_at(&self, token: &str, now: i64) -> Option<Claims> {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!("Rejected token: {:?}", e.kind());
                return None;
            }
        };

        if now > claims.exp {
            tracing::debug!("Rejected token: expired at {}", claims.exp);
            return None;
        }

        Some(claims)
    }

    /// Validate the token carried by an `Authorization: Bearer <token>` value
    pub fn parse_bearer_header(&self, header_value: &str) -> Option<Claims> {
        let token = bearer_token(header_value)?;
        self.validate(token)
    }
}

/// Extract the token from `"Bearer <token>"`
///
/// The scheme is case-insensitive and must be followed by exactly one space
/// and a single non-empty token.
fn bearer_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;

    if parts.next().is_some() || token.is_empty() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}
