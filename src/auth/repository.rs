// User repositories: the storage capability injected into AuthService

use crate::auth::{
    error::{AuthError, ConflictField},
    models::User,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage capability for credential records
///
/// `create` must report an existing email or username as
/// `AuthError::Conflict` so callers can tell it apart from bad input.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Create a new user
    async fn create(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<User, AuthError>;
}

const USERNAME_CONSTRAINT: &str = "users_username_key";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, username, password_hash, created_at, updated_at \
             FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, username, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, email, username, password_hash, created_at, updated_at",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return match db_err.constraint() {
                        Some(USERNAME_CONSTRAINT) => AuthError::Conflict(ConflictField::Username),
                        _ => AuthError::Conflict(ConflictField::Email),
                    };
                }
            }
            AuthError::from(e)
        })?;

        Ok(user)
    }
}

/// In-process user repository
///
/// Used when no database is configured, and by tests.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        // Hold the write lock across the uniqueness check and the insert.
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AuthError::Conflict(ConflictField::Email));
        }
        if users.values().any(|u| u.username == username) {
            return Err(AuthError::Conflict(ConflictField::Username));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }
}
