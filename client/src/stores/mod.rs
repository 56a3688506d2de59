//! Client state stores

pub mod auth;
pub mod stations;

pub use auth::{AuthState, AuthStore};
pub use stations::{StationFilters, StationListStore};
