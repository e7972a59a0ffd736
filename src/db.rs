use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Type alias for the PostgreSQL connection pool
pub type DbPool = PgPool;

/// Connection pool sizing, read from `DB_MAX_CONNECTIONS` and
/// `DB_ACQUIRE_TIMEOUT_SECS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

impl PoolSettings {
    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Opens the user store pool and checks that the database answers
///
/// # Arguments
/// * `database_url` - PostgreSQL connection string
/// * `settings` - pool size and how long a request may wait for a connection
pub async fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(
        "Creating database connection pool (max {} connections)",
        settings.max_connections
    );

    let pool = settings.options().connect(database_url).await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Builds a pool without connecting; connections open on first use
pub fn create_lazy_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    settings.options().connect_lazy(database_url)
}

/// Applies the schema in `migrations/`
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Round-trips `SELECT 1` through the pool
pub async fn ping(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
