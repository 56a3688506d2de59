pub mod auth;
pub mod charging_stations;
pub mod health;
pub mod metrics;
pub mod request_id;
