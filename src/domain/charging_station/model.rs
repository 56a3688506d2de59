//! Charging station domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Actor, UserSummary};

/// Operational status of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationStatus {
    Active,
    Inactive,
    Maintenance,
}

impl StationStatus {
    pub const ALL: [StationStatus; 3] = [Self::Active, Self::Inactive, Self::Maintenance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|v| v.as_str() == s).ok_or(())
    }
}

/// Plug standard offered by a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorType {
    Type1,
    Type2,
    Chademo,
    Ccs,
    TeslaSupercharger,
}

impl ConnectorType {
    pub const ALL: [ConnectorType; 5] = [
        Self::Type1,
        Self::Type2,
        Self::Chademo,
        Self::Ccs,
        Self::TeslaSupercharger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Type1 => "Type 1",
            Self::Type2 => "Type 2",
            Self::Chademo => "CHAdeMO",
            Self::Ccs => "CCS",
            Self::TeslaSupercharger => "Tesla Supercharger",
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|v| v.as_str() == s).ok_or(())
    }
}

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Validated fields of a station about to be created
#[derive(Debug, Clone, PartialEq)]
pub struct NewStation {
    pub name: String,
    pub location: Location,
    pub status: StationStatus,
    pub power_output: f64,
    pub connector_type: ConnectorType,
}

/// Validated subset of fields to overwrite on an existing station.
///
/// Only these fields are mergeable; `id`, `created_by` and the timestamps
/// are never taken from client input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationPatch {
    pub name: Option<String>,
    pub location: Option<Location>,
    pub status: Option<StationStatus>,
    pub power_output: Option<f64>,
    pub connector_type: Option<ConnectorType>,
}

impl StationPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Charging station domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingStation {
    pub id: Uuid,
    pub name: String,
    pub location: Location,
    pub status: StationStatus,
    /// Rated output in kW
    pub power_output: f64,
    pub connector_type: ConnectorType,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChargingStation {
    pub fn new(fields: NewStation, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            location: fields.location,
            status: fields.status,
            power_output: fields.power_output,
            connector_type: fields.connector_type,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow merge: every field present in the patch replaces the current value.
    pub fn apply(&mut self, patch: StationPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(power_output) = patch.power_output {
            self.power_output = power_output;
        }
        if let Some(connector_type) = patch.connector_type {
            self.connector_type = connector_type;
        }
        self.updated_at = Utc::now();
    }

    /// Only the creator or an admin may mutate or delete a station.
    pub fn can_be_modified_by(&self, actor: &Actor) -> bool {
        self.created_by == actor.id || actor.is_admin()
    }
}

/// A station with its creator resolved to a user summary.
///
/// `creator` is `None` only if the referenced user no longer resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedStation {
    pub station: ChargingStation,
    pub creator: Option<UserSummary>,
}
