//! Prometheus metrics: recorder setup, `/metrics` endpoint and HTTP middleware

pub mod handlers;
pub mod middleware;

pub use handlers::*;
pub use middleware::{http_metrics_middleware, record_auth_attempt, record_station_mutation};
