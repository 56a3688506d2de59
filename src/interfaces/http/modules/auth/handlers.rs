//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UserInfo};
use crate::application::{AuthResult, UserService};
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::metrics::record_auth_attempt;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub users: Arc<UserService>,
}

fn auth_response(message: &str, result: AuthResult) -> AuthResponse {
    AuthResponse {
        message: message.to_string(),
        token: result.token,
        user: UserInfo::from(&result.user),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = AuthResponse),
        (status = 400, description = "Invalid credentials or malformed body", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let result = state.users.login(&request.email, &request.password).await;
    record_auth_attempt("login", result.is_ok());
    let result = result.map_err(|e| ApiError::from_domain(e, "Server error during login"))?;

    Ok(Json(auth_response("Login successful", result)))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 409, description = "User already exists", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let result = state
        .users
        .register(&request.name, &request.email, &request.password)
        .await;
    record_auth_attempt("register", result.is_ok());
    let result = result.map_err(|e| ApiError::from_domain(e, "Server error during registration"))?;

    Ok((
        StatusCode::CREATED,
        Json(auth_response("User registered successfully", result)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn profile(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .users
        .profile(user.user_id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Server error fetching profile"))?;

    Ok(Json(ProfileResponse {
        user: UserInfo::from(&user),
    }))
}
