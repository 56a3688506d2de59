//! Station list store: the cached page of stations plus its filters

use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::stores::auth::message_or;
use crate::types::{
    ChargingStationDto, ListStationsParams, PaginationDto, StationListResponse, StationPayload,
};

/// Persisted list filters. `None` and empty strings both mean "any".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationFilters {
    pub status: Option<String>,
    pub connector_type: Option<String>,
    pub min_power: Option<String>,
    pub max_power: Option<String>,
}

impl StationFilters {
    /// Overwrite every field that `other` sets.
    pub fn merge(&mut self, other: StationFilters) {
        if other.status.is_some() {
            self.status = other.status;
        }
        if other.connector_type.is_some() {
            self.connector_type = other.connector_type;
        }
        if other.min_power.is_some() {
            self.min_power = other.min_power;
        }
        if other.max_power.is_some() {
            self.max_power = other.max_power;
        }
    }

    /// List parameters with these filters as the base and `params` on top.
    fn apply(&self, params: ListStationsParams) -> ListStationsParams {
        ListStationsParams {
            status: params.status.or_else(|| self.status.clone()),
            connector_type: params.connector_type.or_else(|| self.connector_type.clone()),
            min_power: params.min_power.or_else(|| self.min_power.clone()),
            max_power: params.max_power.or_else(|| self.max_power.clone()),
            ..params
        }
    }
}

pub struct StationListStore {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    stations: Vec<ChargingStationDto>,
    filters: StationFilters,
    pagination: Option<PaginationDto>,
    loading: bool,
}

impl StationListStore {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            stations: Vec::new(),
            filters: StationFilters::default(),
            pagination: None,
            loading: false,
        }
    }

    pub fn stations(&self) -> &[ChargingStationDto] {
        &self.stations
    }

    pub fn filters(&self) -> &StationFilters {
        &self.filters
    }

    pub fn pagination(&self) -> Option<&PaginationDto> {
        self.pagination.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Load a page. Fields set in `params` override the stored filters.
    pub async fn fetch(&mut self, params: ListStationsParams) -> Result<StationListResponse, ApiError> {
        let params = self.filters.apply(params);

        self.loading = true;
        let result = self.api.list_stations(&params).await;
        self.loading = false;

        match result {
            Ok(response) => {
                self.stations = response.charging_stations.clone();
                self.pagination = Some(response.pagination.clone());
                Ok(response)
            }
            Err(e) => {
                self.notifier.error("Failed to fetch charging stations");
                Err(e)
            }
        }
    }

    /// Create a station and put it at the front of the cache.
    pub async fn create(&mut self, payload: &StationPayload) -> Result<ChargingStationDto, ApiError> {
        self.loading = true;
        let result = self.api.create_station(payload).await;
        self.loading = false;

        match result {
            Ok(response) => {
                let station = response.charging_station;
                self.stations.insert(0, station.clone());
                self.notifier.success("Charging station created successfully!");
                Ok(station)
            }
            Err(e) => {
                self.notifier
                    .error(message_or(&e, "Failed to create charging station"));
                Err(e)
            }
        }
    }

    /// Update a station, replacing the cached copy if there is one.
    pub async fn update(
        &mut self,
        id: &str,
        payload: &StationPayload,
    ) -> Result<ChargingStationDto, ApiError> {
        self.loading = true;
        let result = self.api.update_station(id, payload).await;
        self.loading = false;

        match result {
            Ok(response) => {
                let station = response.charging_station;
                if let Some(cached) = self.stations.iter_mut().find(|s| s.id == id) {
                    *cached = station.clone();
                }
                self.notifier.success("Charging station updated successfully!");
                Ok(station)
            }
            Err(e) => {
                self.notifier
                    .error(message_or(&e, "Failed to update charging station"));
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), ApiError> {
        self.loading = true;
        let result = self.api.delete_station(id).await;
        self.loading = false;

        match result {
            Ok(_) => {
                self.stations.retain(|s| s.id != id);
                self.notifier.success("Charging station deleted successfully!");
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .error(message_or(&e, "Failed to delete charging station"));
                Err(e)
            }
        }
    }

    pub fn set_filters(&mut self, filters: StationFilters) {
        self.filters.merge(filters);
    }

    pub fn clear_filters(&mut self) {
        self.filters = StationFilters::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unset_fields() {
        let mut filters = StationFilters {
            status: Some("Active".into()),
            min_power: Some("10".into()),
            ..Default::default()
        };
        filters.merge(StationFilters {
            min_power: Some("50".into()),
            connector_type: Some("CCS".into()),
            ..Default::default()
        });

        assert_eq!(filters.status.as_deref(), Some("Active"));
        assert_eq!(filters.min_power.as_deref(), Some("50"));
        assert_eq!(filters.connector_type.as_deref(), Some("CCS"));
        assert_eq!(filters.max_power, None);
    }

    #[test]
    fn call_params_override_stored_filters() {
        let filters = StationFilters {
            status: Some("Active".into()),
            connector_type: Some("CCS".into()),
            ..Default::default()
        };
        let params = filters.apply(ListStationsParams {
            status: Some(String::new()),
            page: Some("3".into()),
            ..Default::default()
        });

        assert_eq!(params.status.as_deref(), Some(""));
        assert_eq!(params.connector_type.as_deref(), Some("CCS"));
        assert_eq!(params.page.as_deref(), Some("3"));
    }
}
