//! Charging station use-cases

pub mod service;

pub use service::{parse_station_id, ChargingStationService};
