//! Authentication endpoints

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest};

impl ApiClient {
    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post(&["auth", "login"], &body).await
    }

    /// `POST /auth/register`
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post(&["auth", "register"], &body).await
    }

    /// `GET /auth/profile`
    pub async fn profile(&self) -> Result<ProfileResponse, ApiError> {
        self.get(&["auth", "profile"]).await
    }
}
