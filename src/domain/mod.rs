pub mod charging_station;
pub mod repositories;
pub mod user;

// Re-export commonly used types
pub use charging_station::{
    ChargingStation, ChargingStationRepository, ConnectorType, ExpandedStation, Location,
    NewStation, StationPatch, StationStatus,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{Actor, User, UserRepositoryInterface, UserRole, UserSummary};

// Re-export errors from shared for convenience
pub use crate::shared::{DomainError, FieldError};
