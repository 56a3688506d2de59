//! Identity module: registration & authentication
//!
//! Contains the `UserService` which orchestrates registration, login,
//! profile lookup and the bootstrap admin account.

pub mod service;

pub use service::{normalize_email, AuthResult, UserService};
