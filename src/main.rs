use geo_api::{
    auth::{AuthService, InMemoryUserRepository, PasswordService, PgUserRepository, TokenService, UserRepository},
    config::AppConfig,
    create_router, db, AppState,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging, filtered by RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("geo_api=debug,tower_http=info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Geo API - Starting...");

    // Fail fast: a missing signing secret must never fall back to a default
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let (users, db_pool): (Arc<dyn UserRepository>, Option<db::DbPool>) = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db_pool = db::create_pool(database_url, &config.pool)
                .await
                .expect("Failed to create database pool");
            db::run_migrations(&db_pool)
                .await
                .expect("Failed to run database migrations");
            let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(db_pool.clone()));
            (users, Some(db_pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, user accounts are kept in memory");
            let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
            (users, None)
        }
    };

    let password_service =
        PasswordService::new(config.hash_cost).expect("Invalid password hashing parameters");
    let token_service = TokenService::with_ttl(&config.jwt_secret, config.token_ttl_seconds);

    let state = AppState {
        auth: Arc::new(AuthService::new(users, password_service, token_service)),
        db: db_pool,
    };
    let app = create_router(state);

    // Start the Axum server
    let addr = config.bind_address();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Geo API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
