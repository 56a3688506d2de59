//! Client configuration

/// Base URL used when `STATION_API_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, including the `/api` prefix
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `STATION_API_URL` when set.
    pub fn from_env() -> Self {
        match std::env::var("STATION_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url),
            _ => Self::default(),
        }
    }

    /// Set a custom base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080/api/");
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api");
    }
}
