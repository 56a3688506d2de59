//! Database entities module

pub mod charging_station;
pub mod user;

pub use charging_station::Entity as ChargingStation;
pub use user::Entity as User;
