//! Auth session store
//!
//! `Anonymous → Authenticating → Authenticated → Anonymous`. Token and
//! identity live in the shared [`Session`](crate::session::Session), so a
//! 401 seen by any other store signs this one out too.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::types::{AuthResponse, UserInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
}

pub struct AuthStore {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    loading: bool,
}

impl AuthStore {
    /// Build the store. A resumed token without an identity triggers a
    /// profile fetch; if that fails the session is logged out.
    pub async fn init(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let mut store = Self {
            api,
            notifier,
            loading: false,
        };
        let session = store.api.session();
        if session.is_authenticated() && session.user().is_none() {
            store.fetch_profile().await;
        }
        store
    }

    pub fn state(&self) -> AuthState {
        if self.loading {
            AuthState::Authenticating
        } else if self.api.session().is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.session().is_authenticated()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.api.session().user()
    }

    pub fn token(&self) -> Option<String> {
        self.api.session().token()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.loading = true;
        let result = self.api.login(email, password).await;
        self.loading = false;

        self.finish(result, "Login successful!", "Login failed")
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        self.loading = true;
        let result = self.api.register(name, email, password).await;
        self.loading = false;

        self.finish(result, "Registration successful!", "Registration failed")
    }

    pub fn logout(&mut self) {
        self.api.session().clear();
        self.notifier.info("Logged out successfully");
    }

    /// Reload the identity for the current token. Any failure logs out.
    pub async fn fetch_profile(&mut self) -> Option<UserInfo> {
        match self.api.profile().await {
            Ok(response) => {
                self.api.session().set_user(response.user.clone());
                Some(response.user)
            }
            Err(_) => {
                self.logout();
                None
            }
        }
    }

    fn finish(
        &self,
        result: Result<AuthResponse, ApiError>,
        success: &str,
        failure: &str,
    ) -> Result<AuthResponse, ApiError> {
        match result {
            Ok(response) => {
                self.api
                    .session()
                    .establish(response.token.clone(), response.user.clone());
                self.notifier.success(success);
                Ok(response)
            }
            Err(e) => {
                self.notifier.error(message_or(&e, failure));
                Err(e)
            }
        }
    }
}

pub(crate) fn message_or<'a>(error: &'a ApiError, fallback: &'a str) -> &'a str {
    if error.message.is_empty() {
        fallback
    } else {
        &error.message
    }
}
