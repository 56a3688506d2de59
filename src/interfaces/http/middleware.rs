//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::{Actor, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};
use crate::interfaces::http::common::ApiError;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    UserNotFound,
    Unavailable,
}

/// Authentication state containing JWT config and the user store
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Authenticated user, resolved from the token subject
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }

    pub fn actor(&self) -> Actor {
        Actor {
            id: self.user_id,
            role: self.role,
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Bearer token authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
            return auth_error_response(AuthError::ExpiredToken);
        }
        Err(e) => {
            debug!("Rejected token: {}", e);
            return auth_error_response(AuthError::InvalidToken);
        }
    };

    let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let user = match auth_state.repos.users().get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return auth_error_response(AuthError::UserNotFound),
        Err(e) => {
            error!("Failed to load authenticated user {}: {}", user_id, e);
            return auth_error_response(AuthError::Unavailable);
        }
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser::from_user(&user));
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let err = match error {
        AuthError::MissingToken => ApiError::unauthorized("Missing authentication token"),
        AuthError::InvalidToken => ApiError::unauthorized("Invalid authentication token"),
        AuthError::ExpiredToken => ApiError::unauthorized("Token has expired"),
        AuthError::UserNotFound => ApiError::unauthorized("User no longer exists"),
        AuthError::Unavailable => ApiError::new(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Server error during authentication",
        ),
    };
    err.into_response()
}
