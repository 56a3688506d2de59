//! Registry API client.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::router::{Navigator, Route, RouteHistory};
use crate::session::Session;

/// Client for the registry REST API.
///
/// Cloning is cheap; clones share the HTTP pool and the [`Session`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::new(None, format!("Invalid base URL {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(None, format!("Invalid base URL {}", config.base_url)));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
            navigator,
        })
    }

    /// Client with an in-memory session and a recording navigator.
    pub fn with_base_url(url: impl Into<String>) -> Result<Self, ApiError> {
        Self::new(
            ClientConfig::default().with_base_url(url),
            Session::in_memory(),
            Arc::new(RouteHistory::new()),
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL plus `segments`, each percent-encoded as a single path
    /// segment so that ids cannot change the route.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.http.request(method, self.url(segments));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, segments)).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, segments).query(query)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, segments).json(body)).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::PUT, segments).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, segments)).await
    }

    /// Send, strip the envelope, and normalize failures.
    ///
    /// A 401 ends the session and redirects to login before the error is
    /// returned.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                warn!("Unexpected response body: {}", e);
                ApiError::new(Some(status.as_u16()), e.to_string())
            });
        }

        let error = ApiError::from_response(status.as_u16(), &body);
        debug!(status = status.as_u16(), message = %error.message, "API request failed");

        if error.is_unauthorized() {
            self.session.clear();
            self.navigator.redirect(Route::Login);
        }

        Err(error)
    }
}
