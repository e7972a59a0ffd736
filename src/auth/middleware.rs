// Authentication extractor for protected routes

use crate::auth::{service::AuthService, token::Claims};
use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user extractor for protected routes
///
/// Missing, malformed, tampered, and expired credentials are all rejected
/// with the same 401 response.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: Claims,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Arc::<AuthService>::from_ref(state);

        let claims = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| auth.parse_bearer_header(value))
            .ok_or_else(|| {
                debug!("Rejected request to {}: no valid bearer token", parts.uri.path());
                ApiError::Unauthorized("Invalid or missing token".to_string())
            })?;

        Ok(AuthenticatedUser { claims })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{
        password::fast_password_service, repository::InMemoryUserRepository,
        token::SigningSecret, TokenService,
    };
    use axum::http::{Request, StatusCode};

    fn test_auth_service() -> Arc<AuthService> {
        Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            fast_password_service(),
            TokenService::new(&SigningSecret::new("test_secret_key_for_testing_purposes")),
        ))
    }

    fn create_parts_with_auth(auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/me")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();

        let (parts, _) = req.into_parts();
        parts
    }

    fn create_parts_without_auth() -> Parts {
        let req = Request::builder().uri("/me").body(()).unwrap();
        let (parts, _) = req.into_parts();
        parts
    }

    #[tokio::test]
    async fn test_valid_token_is_accepted() {
        let auth = test_auth_service();
        let token = auth
            .token_service()
            .issue("user123", "user@example.com")
            .unwrap();

        let mut parts = create_parts_with_auth(&format!("Bearer {}", token));
        let user = AuthenticatedUser::from_request_parts(&mut parts, &auth)
            .await
            .unwrap();

        assert_eq!(user.claims.user_id, "user123");
        assert_eq!(user.claims.email, "user@example.com");
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let auth = test_auth_service();
        let mut parts = create_parts_without_auth();

        let err = AuthenticatedUser::from_request_parts(&mut parts, &auth)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_headers_are_rejected() {
        let auth = test_auth_service();
        let token = auth
            .token_service()
            .issue("user123", "user@example.com")
            .unwrap();

        let other_secret = TokenService::new(&SigningSecret::new("another_secret"))
            .issue("user123", "user@example.com")
            .unwrap();

        let headers = vec![
            format!("Token {}", token),
            token.clone(),
            "Bearer invalid_token".to_string(),
            "Bearer not.a.valid.jwt".to_string(),
            format!("Bearer {}", other_secret),
        ];

        for header_value in headers {
            let mut parts = create_parts_with_auth(&header_value);
            let result = AuthenticatedUser::from_request_parts(&mut parts, &auth).await;
            assert!(result.is_err(), "accepted header: {}", header_value);
        }
    }
}
