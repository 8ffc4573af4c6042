//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{ClientMeta, ValidatedJson};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::{ACTION_LOGIN, SCREEN_AUTH};
use crate::domain::{UserResponse, UserRole};
use crate::errors::AppResult;
use crate::infra::AuditEntry;
use crate::services::TokenResponse;
use crate::types::ApiResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Tran Van A")]
    pub name: String,
    /// Role for the new account, defaults to "user"
    pub role: Option<UserRole>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// Public authentication routes (no token required)
pub fn auth_public_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Authentication routes requiring a valid token
pub fn auth_protected_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/me", get(me))
        .route("/profile", put(update_profile))
}

/// Register a new user (admin only)
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not an administrator"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    require_admin(&current_user)?;

    let user = state
        .auth_service
        .register(
            payload.email,
            payload.password,
            payload.name,
            payload.role.unwrap_or(UserRole::User),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserResponse::from(user))),
    ))
}

/// Login and obtain a JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials or inactive account")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    meta: ClientMeta,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let email = payload.email.clone();
    let token = state.auth_service.login(payload.email, payload.password).await?;

    // Token verification cannot fail for a token issued a moment ago, but
    // the audit record is best-effort either way.
    if let Ok(claims) = state.auth_service.verify_token(&token.access_token) {
        state
            .audit
            .record(
                AuditEntry::new(claims.sub, SCREEN_AUTH, ACTION_LOGIN)
                    .with_details(json!({ "email": email }))
                    .with_client(meta.ip_address, meta.user_agent),
            )
            .await;
    }

    Ok(Json(token))
}

/// Current authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.auth_service.current_user(current_user.id).await?;
    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Update own name or password
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    tag = "Authentication",
    request_body = UpdateProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .auth_service
        .update_profile(current_user.id, payload.name, payload.password)
        .await?;

    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}
