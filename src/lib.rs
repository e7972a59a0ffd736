pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod utility;
pub mod validation;

use axum::{
    extract::FromRef,
    response::Json,
    routing::{get, post, MethodRouter},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthResponse, AuthService, Claims, LoginRequest, RegisterRequest, RegisterResponse, UserResponse};
use db::DbPool;
use utility::{DbHealth, DbStatus, HealthResponse, HealthStatus, HelloResponse, TimestampResponse};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::me_handler,
        utility::hello_handler,
        utility::timestamp_handler,
        utility::health_handler,
    ),
    components(
        schemas(
            RegisterRequest, LoginRequest, RegisterResponse, AuthResponse, UserResponse, Claims,
            HelloResponse, TimestampResponse, HealthResponse, HealthStatus, DbHealth, DbStatus
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "auth", description = "User registration and authentication"),
        (name = "utility", description = "Liveness, health, and server time")
    ),
    info(
        title = "Geographic Database API",
        version = "1.0.0",
        description = "REST API for geographic data with user registration and token authentication",
        contact(
            name = "API Support",
            email = "support@geodatabase.com"
        )
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    /// Present when accounts are stored in Postgres; checked by GET /health
    pub db: Option<DbPool>,
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
const ENDPOINTS_PATH: &str = "/endpoints";

/// API routes and their handlers
///
/// Both the router and the GET /endpoints listing are built from this table.
fn api_routes() -> Vec<(&'static str, MethodRouter<AppState>)> {
    vec![
        ("/hello", get(utility::hello_handler)),
        ("/timestamp", get(utility::timestamp_handler)),
        ("/health", get(utility::health_handler)),
        ("/register", post(auth::register_handler)),
        ("/login", post(auth::login_handler)),
        ("/me", get(auth::me_handler)),
    ]
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS and tracing middleware
pub fn create_router(state: AppState) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = api_routes();

    let mut endpoints: Vec<&'static str> = routes
        .iter()
        .map(|(path, _)| *path)
        .chain([ENDPOINTS_PATH, SWAGGER_UI_PATH, OPENAPI_PATH])
        .collect();
    endpoints.sort_unstable();
    let listing = Json(json!({ "Available endpoints": endpoints }));

    let docs = SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi());
    let router = routes
        .into_iter()
        .fold(Router::new().merge(docs), |router, (path, handler)| {
            router.route(path, handler)
        });

    router
        .route(ENDPOINTS_PATH, get(move || async move { listing }))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests;
