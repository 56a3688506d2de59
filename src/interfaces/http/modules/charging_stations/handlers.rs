//! Charging station API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    ChargingStationDto, ListStationsParams, StationListResponse, StationMutationResponse,
    StationPayload, StationResponse,
};
use crate::application::ChargingStationService;
use crate::interfaces::http::common::{ApiError, ErrorBody, JsonBody, MessageResponse, QueryParams};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::metrics::record_station_mutation;

/// Charging station handler state
#[derive(Clone)]
pub struct StationHandlerState {
    pub stations: Arc<ChargingStationService>,
}

#[utoipa::path(
    post,
    path = "/api/charging-stations",
    tag = "Charging Stations",
    request_body = StationPayload,
    responses(
        (status = 201, description = "Station created", body = StationMutationResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_station(
    State(state): State<StationHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(payload): JsonBody<StationPayload>,
) -> Result<(StatusCode, Json<StationMutationResponse>), ApiError> {
    let created = state
        .stations
        .create(payload.into(), &user.actor())
        .await
        .map_err(|e| ApiError::from_domain(e, "Server error creating charging station"))?;
    record_station_mutation("create");

    Ok((
        StatusCode::CREATED,
        Json(StationMutationResponse {
            message: "Charging station created successfully".to_string(),
            charging_station: created.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/charging-stations",
    tag = "Charging Stations",
    params(ListStationsParams),
    responses(
        (status = 200, description = "Page of stations", body = StationListResponse),
        (status = 400, description = "Invalid filter or sort", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_stations(
    State(state): State<StationHandlerState>,
    QueryParams(params): QueryParams<ListStationsParams>,
) -> Result<Json<StationListResponse>, ApiError> {
    let server_message = "Server error fetching charging stations";
    let query = params
        .into_query()
        .map_err(|e| ApiError::from_domain(e, server_message))?;

    let page = state
        .stations
        .list(query)
        .await
        .map_err(|e| ApiError::from_domain(e, server_message))?;

    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/charging-stations/{id}",
    tag = "Charging Stations",
    params(("id" = String, Path, description = "Station id")),
    responses(
        (status = 200, description = "Station", body = StationResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_station(
    State(state): State<StationHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<StationResponse>, ApiError> {
    let station = state
        .stations
        .get_by_id(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, "Server error fetching charging station"))?;

    Ok(Json(StationResponse {
        charging_station: ChargingStationDto::from(station),
    }))
}

#[utoipa::path(
    put,
    path = "/api/charging-stations/{id}",
    tag = "Charging Stations",
    params(("id" = String, Path, description = "Station id")),
    request_body = StationPayload,
    responses(
        (status = 200, description = "Station updated", body = StationMutationResponse),
        (status = 400, description = "Validation error or malformed id", body = ErrorBody),
        (status = 403, description = "Not the creator", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_station(
    State(state): State<StationHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<StationPayload>,
) -> Result<Json<StationMutationResponse>, ApiError> {
    let updated = state
        .stations
        .update(&id, payload.into(), &user.actor())
        .await
        .map_err(|e| ApiError::from_domain(e, "Server error updating charging station"))?;
    record_station_mutation("update");

    Ok(Json(StationMutationResponse {
        message: "Charging station updated successfully".to_string(),
        charging_station: updated.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/charging-stations/{id}",
    tag = "Charging Stations",
    params(("id" = String, Path, description = "Station id")),
    responses(
        (status = 200, description = "Station deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 403, description = "Not the creator", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_station(
    State(state): State<StationHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .stations
        .delete(&id, &user.actor())
        .await
        .map_err(|e| ApiError::from_domain(e, "Server error deleting charging station"))?;
    record_station_mutation("delete");

    Ok(Json(MessageResponse::new("Charging station deleted successfully")))
}
