//! HTTP access to the registry API
//!
//! [`ApiClient`] handles the bearer token and the error envelope; the
//! endpoint methods live next to each other per resource.

mod auth;
mod client;
mod stations;

pub use client::ApiClient;
pub use stations::query_pairs;
