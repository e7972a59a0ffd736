// Authentication service - business logic layer

use crate::auth::{
    error::AuthError,
    models::UserResponse,
    password::PasswordService,
    repository::UserRepository,
    token::{Claims, TokenService},
};
use crate::validation::validate_registration;
use std::sync::Arc;

/// Canonical form used to store and look up emails
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authentication service coordinating all auth operations
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    password_service: PasswordService,
    token_service: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_service: PasswordService,
        token_service: TokenService,
    ) -> Self {
        Self {
            users,
            password_service,
            token_service,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Register a new user
    ///
    /// Account rules run in order (email, username, password) before the
    /// repository is touched. Taken emails or usernames come back as
    /// `AuthError::Conflict`.
    pub async fn register(
        &self,
        email: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<UserResponse, AuthError> {
        validate_registration(email, username, password).map_err(|e| {
            tracing::debug!("Registration rejected: {}", e.code);
            AuthError::Validation(e)
        })?;

        // validate_registration guarantees all three are present
        let email = normalize_email(email.unwrap_or_default());
        let username = username.unwrap_or_default().trim().to_string();
        let password_hash = self.hash_password(password.unwrap_or_default()).await?;

        let user = self.users.create(&email, &username, &password_hash).await?;

        tracing::info!("Registered user with id: {}", user.id);
        Ok(UserResponse::from(user))
    }

    /// Check an email/password pair and issue a token on success
    ///
    /// Unknown email and wrong password both return `Ok(None)`. Errors are
    /// reserved for repository, hashing, and signing failures.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<(String, UserResponse)>, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Ok(None);
        }

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Authentication failed");
                return Ok(None);
            }
        };

        if !self.verify_password(password, &user.password_hash).await? {
            tracing::warn!("Authentication failed");
            return Ok(None);
        }

        let token = self.token_service.issue(&user.id.to_string(), &user.email)?;

        tracing::info!("User {} authenticated", user.id);
        Ok(Some((token, UserResponse::from(user))))
    }

    /// Validate a bare token
    pub fn validate_token(&self, token: &str) -> Option<Claims> {
        self.token_service.validate(token)
    }

    /// Validate an `Authorization` header value
    pub fn parse_bearer_header(&self, header_value: &str) -> Option<Claims> {
        self.token_service.parse_bearer_header(header_value)
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let service = self.password_service.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || service.hash_password(&password))
            .await
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let service = self.password_service.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || service.verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }
}
