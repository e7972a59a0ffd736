// Utility endpoints: liveness, database health, and the server clock

use crate::{db, AppState};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HelloResponse {
    #[schema(example = "world")]
    pub hello: String,
}

/// Current server time as RFC 3339 and as Unix seconds
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TimestampResponse {
    #[schema(example = "2024-01-01T12:00:00.000000+00:00")]
    pub timestamp: String,
    #[schema(example = 1704110400)]
    pub unix: i64,
}

/// Overall service health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

/// State of the user store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DbStatus {
    Connected,
    Unavailable,
    /// No database configured; accounts live in process memory
    InMemory,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DbHealth {
    pub status: DbStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub unix: i64,
    pub db: DbHealth,
}

/// Handler for GET /hello
#[utoipa::path(
    get,
    path = "/hello",
    tag = "utility",
    responses(
        (status = 200, description = "Server is running", body = HelloResponse)
    )
)]
pub async fn hello_handler() -> Json<HelloResponse> {
    Json(HelloResponse {
        hello: "world".to_string(),
    })
}

/// Handler for GET /timestamp
#[utoipa::path(
    get,
    path = "/timestamp",
    tag = "utility",
    responses(
        (status = 200, description = "Current server timestamp", body = TimestampResponse)
    )
)]
pub async fn timestamp_handler() -> Json<TimestampResponse> {
    let now = Utc::now();
    Json(TimestampResponse {
        timestamp: now.to_rfc3339(),
        unix: now.timestamp(),
    })
}

/// Handler for GET /health
///
/// Runs `SELECT 1` against the configured database. A failed check reports
/// `degraded` with 503; the in-memory store is always healthy.
#[utoipa::path(
    get,
    path = "/health",
    tag = "utility",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match &state.db {
        None => DbStatus::InMemory,
        Some(pool) => match db::ping(pool).await {
            Ok(()) => DbStatus::Connected,
            Err(e) => {
                tracing::warn!("Database health check failed: {}", e);
                DbStatus::Unavailable
            }
        },
    };

    let (code, status) = match db_status {
        DbStatus::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Degraded),
        DbStatus::Connected | DbStatus::InMemory => (StatusCode::OK, HealthStatus::Ok),
    };

    let now = Utc::now();
    (
        code,
        Json(HealthResponse {
            status,
            timestamp: now.to_rfc3339(),
            unix: now.timestamp(),
            db: DbHealth { status: db_status },
        }),
    )
}
