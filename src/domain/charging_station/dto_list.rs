use super::model::{ConnectorType, StationStatus};
use super::repository::{StationFilter, StationQuery, StationSort};
use crate::domain::{DomainError, DomainResult};
use crate::shared::{validate_pagination, FieldError};

/// Raw list parameters as they arrive from the query string.
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct ListStationsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub connector_type: Option<String>,
    pub min_power: Option<f64>,
    pub max_power: Option<f64>,
    pub sort: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ListStationsQuery {
    pub fn parse(self) -> DomainResult<StationQuery> {
        let mut errors = Vec::new();

        let status = match non_empty(self.status) {
            None => None,
            Some(s) => s.parse::<StationStatus>().map(Some).unwrap_or_else(|_| {
                errors.push(FieldError::new(
                    "status",
                    "Status must be Active, Inactive, or Maintenance",
                ));
                None
            }),
        };

        let connector_type = match non_empty(self.connector_type) {
            None => None,
            Some(c) => c.parse::<ConnectorType>().map(Some).unwrap_or_else(|_| {
                errors.push(FieldError::new("connectorType", "Invalid connector type"));
                None
            }),
        };

        let sort = match non_empty(self.sort) {
            None => StationSort::default(),
            Some(s) => s.parse::<StationSort>().unwrap_or_else(|_| {
                errors.push(FieldError::new("sort", format!("Unsupported sort field: {s}")));
                StationSort::default()
            }),
        };

        if let (Some(min), Some(max)) = (self.min_power, self.max_power) {
            if min > max {
                errors.push(FieldError::new(
                    "minPower",
                    "minPower cannot be greater than maxPower",
                ));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(StationQuery {
            filter: StationFilter {
                status,
                connector_type,
                min_power: self.min_power,
                max_power: self.max_power,
            },
            pagination: validate_pagination(self.page, self.limit),
            sort,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::charging_station::{SortDirection, SortField};

    #[test]
    fn defaults_when_nothing_given() {
        let query = ListStationsQuery::default().parse().unwrap();
        assert_eq!(query.filter, StationFilter::default());
        assert_eq!(query.pagination.page, 1);
        assert_eq!(query.pagination.limit, 10);
        assert_eq!(query.sort.field, SortField::CreatedAt);
        assert_eq!(query.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn empty_strings_are_ignored() {
        let query = ListStationsQuery {
            status: Some(String::new()),
            connector_type: Some("".into()),
            sort: Some(" ".into()),
            ..Default::default()
        }
        .parse()
        .unwrap();
        assert!(query.filter.status.is_none());
        assert!(query.filter.connector_type.is_none());
    }

    #[test]
    fn rejects_unknown_values() {
        let err = ListStationsQuery {
            status: Some("Broken".into()),
            sort: Some("-password".into()),
            ..Default::default()
        }
        .parse()
        .unwrap_err();

        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["status", "sort"]);
    }

    #[test]
    fn clamps_pagination() {
        let query = ListStationsQuery {
            page: Some(0),
            limit: Some(500),
            ..Default::default()
        }
        .parse()
        .unwrap();
        assert_eq!(query.pagination.page, 1);
        assert_eq!(query.pagination.limit, 100);
    }
}
