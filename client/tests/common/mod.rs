//! Test server: the real router over the in-memory store
#![allow(dead_code)]

use std::sync::Arc;

use station_client::{ApiClient, ClientConfig, RouteHistory, Session, ToastLog};
use station_registry::application::UserService;
use station_registry::domain::RepositoryProvider;
use station_registry::infrastructure::crypto::jwt::JwtConfig;
use station_registry::{create_api_router, ApiState, InMemoryStorage};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const PASSWORD: &str = "secret123";

pub struct TestServer {
    pub base_url: String,
    pub repos: Arc<dyn RepositoryProvider>,
}

pub async fn spawn_server() -> TestServer {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStorage::new());
    let jwt = JwtConfig::default();

    UserService::new(repos.clone(), jwt.clone())
        .with_bcrypt_cost(4)
        .ensure_admin("Admin", ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();

    let state = ApiState::new(repos.clone(), jwt).with_bcrypt_cost(4);
    let router = create_api_router(state, None);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}/api", addr),
        repos,
    }
}

/// A fresh client context: its own session, navigator and toast log.
pub struct Client {
    pub api: ApiClient,
    pub history: Arc<RouteHistory>,
    pub toasts: Arc<ToastLog>,
}

impl TestServer {
    pub fn client(&self) -> Client {
        self.client_with_session(Session::in_memory())
    }

    pub fn client_with_session(&self, session: Session) -> Client {
        let history = Arc::new(RouteHistory::new());
        let api = ApiClient::new(
            ClientConfig::default().with_base_url(self.base_url.clone()),
            session,
            history.clone(),
        )
        .unwrap();
        Client {
            api,
            history,
            toasts: Arc::new(ToastLog::new()),
        }
    }

    /// Register a user and return a signed-in client for them.
    pub async fn signed_in(&self, name: &str, email: &str) -> Client {
        let client = self.client();
        let auth = client.api.register(name, email, PASSWORD).await.unwrap();
        client.api.session().establish(auth.token, auth.user);
        client
    }
}

pub fn station(name: &str, power: f64) -> station_client::types::StationPayload {
    use serde_json::json;
    use station_client::types::{LocationPayload, StationPayload};

    StationPayload {
        name: Some(name.into()),
        location: Some(LocationPayload {
            latitude: Some(json!(40.7128)),
            longitude: Some(json!(-74.006)),
        }),
        status: Some("Active".into()),
        power_output: Some(power.into()),
        connector_type: Some("CCS".into()),
    }
}
