//! # Station Registry
//!
//! REST backend for managing EV charging station records, with
//! JWT authentication and role-based ownership rules.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities, validation rules and repository traits
//! - **application**: Use cases (authentication, station CRUD)
//! - **infrastructure**: Database (SeaORM), in-memory storage, crypto
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors, pagination, shutdown handling

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};
