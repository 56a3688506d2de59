//! User service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::user::CreateUserDto;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};

/// Token plus the user it was issued for
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

/// Emails are compared and stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Orchestrates the identity use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self {
            repos,
            jwt_config,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a signed token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);
        let Some(user) = self.repos.users().get_user_by_email(&email).await? else {
            return Err(DomainError::InvalidCredentials);
        };

        let hash = user.password_hash.clone();
        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| DomainError::Storage(format!("Password check aborted: {}", e)))?
            .unwrap_or(false);
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(user)
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user with role `user`. Field format is checked at the
    /// HTTP boundary; duplicates fail with `Conflict`.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self
            .create(name.trim(), &normalize_email(email), password, UserRole::User)
            .await?;
        info!(user_id = %user.id, "New user registered");
        self.issue(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn profile(&self, user_id: Uuid) -> DomainResult<User> {
        self.repos
            .users()
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })
    }

    /// Create the configured admin account when no users exist yet.
    /// Returns the new admin, or `None` when the store was not empty.
    pub async fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        if self.repos.users().count_users().await? > 0 {
            return Ok(None);
        }

        let admin = self
            .create(name, &normalize_email(email), password, UserRole::Admin)
            .await?;
        warn!(email = %admin.email, "Created bootstrap admin account, change its password");
        Ok(Some(admin))
    }

    // ── Internals ───────────────────────────────────────────────

    async fn create(&self, name: &str, email: &str, password: &str, role: UserRole) -> DomainResult<User> {
        if self.repos.users().get_user_by_email(email).await?.is_some() {
            return Err(DomainError::Conflict("User already exists".into()));
        }

        let cost = self.bcrypt_cost;
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password_with_cost(&password, cost))
            .await
            .map_err(|e| DomainError::Storage(format!("Password hashing aborted: {}", e)))?
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        self.repos
            .users()
            .create_user(CreateUserDto {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await
    }

    fn issue(&self, user: User) -> DomainResult<AuthResult> {
        let token = create_token(&user, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;
        Ok(AuthResult { token, user })
    }
}
