// Authentication error types

use std::fmt;
use validator::ValidationError;

/// Which unique field of a credential record was already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    Username,
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictField::Email => write!(f, "email"),
            ConflictField::Username => write!(f, "username"),
        }
    }
}

/// Errors raised by the authentication core
///
/// A failed login is not an error: `AuthService::authenticate` returns
/// `Ok(None)` for unknown accounts and wrong passwords alike.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// User-supplied input broke an account rule
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// Email or username already registered
    #[error("Conflict: {0} already exists")]
    Conflict(ConflictField),

    /// The password could not be hashed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    /// The injected user repository failed
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::Validation(err)
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Repository(err.to_string())
    }
}

impl AuthError {
    /// Message that is safe to show to a client
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Validation(err) => err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string()),
            AuthError::Conflict(ConflictField::Email) => "Email already registered".to_string(),
            AuthError::Conflict(ConflictField::Username) => "Username already taken".to_string(),
            AuthError::PasswordHash(_)
            | AuthError::TokenGeneration(_)
            | AuthError::Repository(_) => "Internal server error".to_string(),
        }
    }
}
