use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::instrument;

use jobboard_core::{ApiResponse, AppError};

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest, UsersResponse};
use super::service::AuthService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let response =
        AuthService::register(state.credentials.as_ref(), &state.auth_config, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("User registered successfully", response)),
    ))
}

/// Log in as a registered user or the configured superadmin
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let response = AuthService::login(state.credentials.as_ref(), &state.auth_config, dto).await?;
    Ok(Json(ApiResponse::with_message("Login successful", response)))
}

/// Log out. Tokens are stateless, so the client simply discards its token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(identity = %identity.id()))]
pub async fn logout(AuthUser(identity): AuthUser) -> Json<ApiResponse<Value>> {
    tracing::debug!("logout acknowledged");
    Json(ApiResponse::with_message("Logged out successfully", json!({})))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(identity = %identity.id()))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ApiResponse<CurrentUserResponse>>, AppError> {
    let user = AuthService::current_identity(state.credentials.as_ref(), &identity).await?;
    Ok(Json(ApiResponse::ok(CurrentUserResponse { user })))
}

/// List every registered user
#[utoipa::path(
    get,
    path = "/api/auth/users",
    responses(
        (status = 200, description = "All users", body = UsersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UsersResponse>>, AppError> {
    let users = AuthService::list_users(state.credentials.as_ref()).await?;
    Ok(Json(ApiResponse::ok(UsersResponse { users })))
}
