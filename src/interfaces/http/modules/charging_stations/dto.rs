//! Charging station DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::charging_station::{ListStationsQuery, LocationInput, RawField, StationInput};
use crate::domain::{DomainError, DomainResult, ExpandedStation, FieldError, UserSummary};
use crate::shared::PaginatedResult;

/// Location as sent by clients; both coordinates are required on create.
///
/// Coordinates are kept as raw JSON so a wrong type becomes a field error
/// instead of a body rejection. Numeric strings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub latitude: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub longitude: Option<Value>,
}

/// Request body for create and update. Unknown fields are ignored, and
/// every field is type-checked during validation rather than by serde.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient_location",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<LocationPayload>,
    /// Active, Inactive or Maintenance
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub status: Option<Value>,
    /// kW, 1 to 350
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub power_output: Option<Value>,
    /// Type 1, Type 2, CHAdeMO, CCS or Tesla Supercharger
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub connector_type: Option<Value>,
}

/// A `location` that is not an object is kept as an empty one, so both
/// coordinates get reported.
fn lenient_location<'de, D>(deserializer: D) -> Result<Option<LocationPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| serde_json::from_value(v).unwrap_or_default()))
}

fn raw(value: Option<Value>) -> Option<RawField> {
    value.map(|v| match v {
        Value::String(s) => RawField::Text(s),
        Value::Number(n) => n.as_f64().map_or(RawField::Other, RawField::Number),
        _ => RawField::Other,
    })
}

impl From<StationPayload> for StationInput {
    fn from(p: StationPayload) -> Self {
        Self {
            name: raw(p.name),
            location: p.location.map(|l| LocationInput {
                latitude: raw(l.latitude),
                longitude: raw(l.longitude),
            }),
            status: raw(p.status),
            power_output: raw(p.power_output),
            connector_type: raw(p.connector_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// The station's creator, as embedded in station records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatorDto {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserSummary> for CreatorDto {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name,
            email: u.email,
        }
    }
}

/// Charging station API representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStationDto {
    pub id: String,
    pub name: String,
    pub location: LocationDto,
    pub status: String,
    pub power_output: f64,
    pub connector_type: String,
    /// `null` only if the creator account no longer resolves
    pub created_by: Option<CreatorDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExpandedStation> for ChargingStationDto {
    fn from(e: ExpandedStation) -> Self {
        let s = e.station;
        Self {
            id: s.id.to_string(),
            name: s.name,
            location: LocationDto {
                latitude: s.location.latitude,
                longitude: s.location.longitude,
            },
            status: s.status.as_str().to_string(),
            power_output: s.power_output,
            connector_type: s.connector_type.as_str().to_string(),
            created_by: e.creator.map(CreatorDto::from),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Create and update response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationMutationResponse {
    pub message: String,
    pub charging_station: ChargingStationDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationResponse {
    pub charging_station: ChargingStationDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationListResponse {
    pub charging_stations: Vec<ChargingStationDto>,
    pub pagination: PaginationDto,
}

impl From<PaginatedResult<ExpandedStation>> for StationListResponse {
    fn from(page: PaginatedResult<ExpandedStation>) -> Self {
        let pagination = PaginationDto {
            current_page: page.page,
            total_pages: page.total_pages,
            total_items: page.total,
            items_per_page: page.limit,
        };
        Self {
            charging_stations: page.items.into_iter().map(ChargingStationDto::from).collect(),
            pagination,
        }
    }
}

/// List query string. Values arrive as text so that empty values can be
/// treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListStationsParams {
    /// Page number, starting at 1
    pub page: Option<String>,
    /// Page size, 1 to 100 (default 10)
    pub limit: Option<String>,
    pub status: Option<String>,
    pub connector_type: Option<String>,
    /// Inclusive lower bound on power output (kW)
    pub min_power: Option<String>,
    /// Inclusive upper bound on power output (kW)
    pub max_power: Option<String>,
    /// Sort field; prefix with `-` for descending (default `createdAt`)
    pub sort: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    value: Option<String>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let raw = present(value)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn parse_power(value: Option<String>, field: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    let message = format!("{} must be a number", field);
    let power = parse_number::<f64>(value, field, &message, errors)?;
    if power.is_finite() {
        Some(power)
    } else {
        errors.push(FieldError::new(field, message));
        None
    }
}

impl ListStationsParams {
    pub fn into_query(self) -> DomainResult<ListStationsQuery> {
        let mut errors = Vec::new();

        let page = parse_number(self.page, "page", "Page must be a positive integer", &mut errors);
        let limit = parse_number(self.limit, "limit", "Limit must be a positive integer", &mut errors);
        let min_power = parse_power(self.min_power, "minPower", &mut errors);
        let max_power = parse_power(self.max_power, "maxPower", &mut errors);

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(ListStationsQuery {
            page,
            limit,
            status: present(self.status),
            connector_type: present(self.connector_type),
            min_power,
            max_power,
            sort: present(self.sort),
        })
    }
}
