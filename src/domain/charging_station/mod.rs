//! Charging station aggregate
//!
//! Contains the station entity, input validation, list query types and
//! the repository interface.

pub mod model;
pub mod repository;
pub mod validation;

mod dto_list;

pub use model::{
    ChargingStation, ConnectorType, ExpandedStation, Location, NewStation, StationPatch,
    StationStatus,
};

pub use dto_list::ListStationsQuery;

pub use repository::{
    ChargingStationRepository, SortDirection, SortField, StationFilter, StationQuery, StationSort,
};

pub use validation::{
    validate_new_station, validate_station_patch, LocationInput, RawField, StationInput,
};
