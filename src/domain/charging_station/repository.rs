//! Charging station repository interface and query types

use std::cmp::Ordering;
use std::str::FromStr;

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{ChargingStation, ConnectorType, ExpandedStation, StationStatus};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

/// Equality and range filters for station listing. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationFilter {
    pub status: Option<StationStatus>,
    pub connector_type: Option<ConnectorType>,
    /// Inclusive lower bound on power output (kW)
    pub min_power: Option<f64>,
    /// Inclusive upper bound on power output (kW)
    pub max_power: Option<f64>,
}

impl StationFilter {
    pub fn matches(&self, station: &ChargingStation) -> bool {
        self.status.map_or(true, |s| station.status == s)
            && self.connector_type.map_or(true, |c| station.connector_type == c)
            && self.min_power.map_or(true, |min| station.power_output >= min)
            && self.max_power.map_or(true, |max| station.power_output <= max)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Name,
    Status,
    PowerOutput,
    ConnectorType,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Status => "status",
            Self::PowerOutput => "powerOutput",
            Self::ConnectorType => "connectorType",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "status" => Ok(Self::Status),
            "powerOutput" => Ok(Self::PowerOutput),
            "connectorType" => Ok(Self::ConnectorType),
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort key in the `field` / `-field` notation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StationSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl StationSort {
    /// Total order used by backends that sort in memory.
    /// Ties fall back to creation time, then id.
    pub fn compare(&self, a: &ChargingStation, b: &ChargingStation) -> Ordering {
        let primary = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::PowerOutput => a.power_output.total_cmp(&b.power_output),
            SortField::ConnectorType => a.connector_type.as_str().cmp(b.connector_type.as_str()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        let primary = match self.direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for StationSort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (direction, field) = match s.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, s),
        };
        Ok(Self {
            field: field.parse()?,
            direction,
        })
    }
}

/// Fully parsed list request
#[derive(Debug, Clone, PartialEq)]
pub struct StationQuery {
    pub filter: StationFilter,
    pub pagination: PaginationParams,
    pub sort: StationSort,
}

#[async_trait]
pub trait ChargingStationRepository: Send + Sync {
    async fn insert(&self, station: &ChargingStation) -> DomainResult<()>;
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<ChargingStation>>;
    /// Like `find_by_id`, with the creator resolved.
    async fn find_expanded(&self, id: Uuid) -> DomainResult<Option<ExpandedStation>>;
    async fn list(&self, query: &StationQuery) -> DomainResult<PaginatedResult<ExpandedStation>>;
    async fn update(&self, station: &ChargingStation) -> DomainResult<()>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;
}
