pub mod identity;
pub mod stations;

pub use identity::{AuthResult, UserService};
pub use stations::ChargingStationService;
