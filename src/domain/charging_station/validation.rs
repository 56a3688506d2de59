//! Field-level validation of station input
//!
//! Every failing field is reported, not just the first one.

use super::model::{ConnectorType, Location, NewStation, StationPatch, StationStatus};
use crate::domain::{DomainError, DomainResult};
use crate::shared::FieldError;

pub const NAME_MAX_CHARS: usize = 100;
pub const POWER_OUTPUT_MIN_KW: f64 = 1.0;
pub const POWER_OUTPUT_MAX_KW: f64 = 350.0;

const MSG_NAME_REQUIRED: &str = "Name is required";
const MSG_NAME_TOO_LONG: &str = "Name cannot exceed 100 characters";
const MSG_NAME_TYPE: &str = "Name must be a string";
const MSG_LATITUDE: &str = "Latitude must be between -90 and 90";
const MSG_LONGITUDE: &str = "Longitude must be between -180 and 180";
const MSG_STATUS: &str = "Status must be Active, Inactive, or Maintenance";
const MSG_POWER: &str = "Power output must be between 1 and 350 kW";
const MSG_CONNECTOR: &str = "Invalid connector type";

/// A field value as it arrived, before any type check
#[derive(Debug, Clone, PartialEq)]
pub enum RawField {
    Text(String),
    Number(f64),
    /// Any other JSON shape: bool, array, object
    Other,
}

impl From<&str> for RawField {
    fn from(s: &str) -> Self {
        RawField::Text(s.to_string())
    }
}

impl From<String> for RawField {
    fn from(s: String) -> Self {
        RawField::Text(s)
    }
}

impl From<f64> for RawField {
    fn from(n: f64) -> Self {
        RawField::Number(n)
    }
}

impl RawField {
    /// Numbers, and strings holding a number
    fn as_number(&self) -> Option<f64> {
        match self {
            RawField::Number(n) => Some(*n),
            RawField::Text(s) => s.trim().parse().ok(),
            RawField::Other => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            RawField::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Raw, unvalidated location as received from a client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationInput {
    pub latitude: Option<RawField>,
    pub longitude: Option<RawField>,
}

/// Raw, unvalidated station fields as received from a client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationInput {
    pub name: Option<RawField>,
    pub location: Option<LocationInput>,
    pub status: Option<RawField>,
    pub power_output: Option<RawField>,
    pub connector_type: Option<RawField>,
}

/// Validate input for a new station. All fields are required.
pub fn validate_new_station(input: StationInput) -> DomainResult<NewStation> {
    let mut errors = Vec::new();

    let name = keep(&mut errors, parse_name(input.name));
    let location = parse_location(input.location.unwrap_or_default(), &mut errors);
    let status = keep(&mut errors, parse_status(input.status));
    let power_output = keep(&mut errors, parse_power_output(input.power_output));
    let connector_type = keep(&mut errors, parse_connector_type(input.connector_type));

    let (Some(name), Some(location), Some(status), Some(power_output), Some(connector_type)) =
        (name, location, status, power_output, connector_type)
    else {
        return Err(DomainError::Validation(errors));
    };

    Ok(NewStation {
        name,
        location,
        status,
        power_output,
        connector_type,
    })
}

/// Validate input for an update. Absent fields are left untouched, present
/// fields must satisfy the same constraints as on creation.
pub fn validate_station_patch(input: StationInput) -> DomainResult<StationPatch> {
    let mut errors = Vec::new();

    let patch = StationPatch {
        name: input
            .name
            .and_then(|n| keep(&mut errors, parse_name(Some(n)))),
        location: input
            .location
            .and_then(|l| parse_location(l, &mut errors)),
        status: input
            .status
            .and_then(|s| keep(&mut errors, parse_status(Some(s)))),
        power_output: input
            .power_output
            .and_then(|p| keep(&mut errors, parse_power_output(Some(p)))),
        connector_type: input
            .connector_type
            .and_then(|c| keep(&mut errors, parse_connector_type(Some(c)))),
    };

    if !errors.is_empty() {
        return Err(DomainError::Validation(errors));
    }
    Ok(patch)
}

fn keep<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn parse_name(name: Option<RawField>) -> Result<String, FieldError> {
    match name {
        None => Err(FieldError::new("name", MSG_NAME_REQUIRED)),
        Some(RawField::Text(n)) if n.is_empty() => Err(FieldError::new("name", MSG_NAME_REQUIRED)),
        Some(RawField::Text(n)) if n.chars().count() > NAME_MAX_CHARS => {
            Err(FieldError::new("name", MSG_NAME_TOO_LONG))
        }
        Some(RawField::Text(n)) => Ok(n),
        Some(_) => Err(FieldError::new("name", MSG_NAME_TYPE)),
    }
}

fn in_range(value: Option<&RawField>, min: f64, max: f64) -> Option<f64> {
    value
        .and_then(RawField::as_number)
        .filter(|v| v.is_finite() && *v >= min && *v <= max)
}

fn parse_location(input: LocationInput, errors: &mut Vec<FieldError>) -> Option<Location> {
    let latitude = in_range(input.latitude.as_ref(), -90.0, 90.0);
    let longitude = in_range(input.longitude.as_ref(), -180.0, 180.0);

    if latitude.is_none() {
        errors.push(FieldError::new("location.latitude", MSG_LATITUDE));
    }
    if longitude.is_none() {
        errors.push(FieldError::new("location.longitude", MSG_LONGITUDE));
    }

    Some(Location {
        latitude: latitude?,
        longitude: longitude?,
    })
}

fn parse_status(status: Option<RawField>) -> Result<StationStatus, FieldError> {
    status
        .and_then(RawField::into_text)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| FieldError::new("status", MSG_STATUS))
}

fn parse_power_output(power: Option<RawField>) -> Result<f64, FieldError> {
    in_range(power.as_ref(), POWER_OUTPUT_MIN_KW, POWER_OUTPUT_MAX_KW)
        .ok_or_else(|| FieldError::new("powerOutput", MSG_POWER))
}

fn parse_connector_type(connector: Option<RawField>) -> Result<ConnectorType, FieldError> {
    connector
        .and_then(RawField::into_text)
        .and_then(|c| c.parse().ok())
        .ok_or_else(|| FieldError::new("connectorType", MSG_CONNECTOR))
}
