// HTTP handlers for authentication endpoints

use crate::auth::{
    middleware::AuthenticatedUser,
    models::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse},
    token::Claims,
};
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// Register a new user
/// POST /register
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = RegisterResponse),
        (status = 400, description = "Invalid input data", body = String, example = json!({"error_code": "VALIDATION_ERROR", "message": "Invalid email format"})),
        (status = 409, description = "Email or username already taken", body = String, example = json!({"error_code": "CONFLICT", "message": "Email already registered"})),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state
        .auth
        .register(
            request.email.as_deref(),
            request.username.as_deref(),
            request.password.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Login a user
/// POST /login
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = String, example = json!({"error_code": "UNAUTHORIZED", "message": "Invalid credentials"})),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let (email, password) = match (request.email.as_deref(), request.password.as_deref()) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(invalid()),
    };

    let (token, user) = state
        .auth
        .authenticate(email, password)
        .await?
        .ok_or_else(invalid)?;

    Ok(Json(AuthResponse { token, user }))
}

/// Get the token payload of the caller (protected endpoint)
/// GET /me
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Token payload of the caller", body = Claims),
        (status = 401, description = "Invalid or missing token", body = String)
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn me_handler(user: AuthenticatedUser) -> Json<Claims> {
    Json(user.claims)
}
