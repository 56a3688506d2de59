//! Charging station endpoints

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{
    ListStationsParams, MessageResponse, StationListResponse, StationMutationResponse,
    StationPayload, StationResponse,
};

/// Query pairs for a list request, without empty or absent values.
pub fn query_pairs(params: &ListStationsParams) -> Vec<(&'static str, String)> {
    [
        ("status", &params.status),
        ("connectorType", &params.connector_type),
        ("minPower", &params.min_power),
        ("maxPower", &params.max_power),
        ("page", &params.page),
        ("limit", &params.limit),
        ("sort", &params.sort),
    ]
    .into_iter()
    .filter_map(|(key, value)| {
        let value = value.as_deref()?.trim();
        (!value.is_empty()).then(|| (key, value.to_string()))
    })
    .collect()
}

impl ApiClient {
    /// `GET /charging-stations`
    pub async fn list_stations(
        &self,
        params: &ListStationsParams,
    ) -> Result<StationListResponse, ApiError> {
        self.get_with_query(&["charging-stations"], &query_pairs(params))
            .await
    }

    /// `GET /charging-stations/{id}`
    pub async fn get_station(&self, id: &str) -> Result<StationResponse, ApiError> {
        self.get(&["charging-stations", id]).await
    }

    /// `POST /charging-stations`
    pub async fn create_station(
        &self,
        payload: &StationPayload,
    ) -> Result<StationMutationResponse, ApiError> {
        self.post(&["charging-stations"], payload).await
    }

    /// `PUT /charging-stations/{id}`
    pub async fn update_station(
        &self,
        id: &str,
        payload: &StationPayload,
    ) -> Result<StationMutationResponse, ApiError> {
        self.put(&["charging-stations", id], payload).await
    }

    /// `DELETE /charging-stations/{id}`
    pub async fn delete_station(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.delete(&["charging-stations", id]).await
    }
}
