//! SeaORM implementation of ChargingStationRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::db_err;
use super::user_repository::user_model_to_domain;
use crate::domain::charging_station::{
    ChargingStation, ChargingStationRepository, ConnectorType, ExpandedStation, Location,
    SortDirection, SortField, StationQuery, StationStatus,
};
use crate::domain::{DomainError, DomainResult, UserSummary};
use crate::infrastructure::database::entities::{charging_station, user};
use crate::shared::PaginatedResult;

pub struct SeaOrmChargingStationRepository {
    db: DatabaseConnection,
}

impl SeaOrmChargingStationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn corrupt(column: &str, value: &str) -> DomainError {
    DomainError::Storage(format!("Corrupt {} in charging_stations: {}", column, value))
}

fn model_to_domain(model: charging_station::Model) -> DomainResult<ChargingStation> {
    let id = Uuid::parse_str(&model.id).map_err(|_| corrupt("id", &model.id))?;
    let created_by =
        Uuid::parse_str(&model.created_by).map_err(|_| corrupt("created_by", &model.created_by))?;
    let status: StationStatus = model
        .status
        .parse()
        .map_err(|_| corrupt("status", &model.status))?;
    let connector_type: ConnectorType = model
        .connector_type
        .parse()
        .map_err(|_| corrupt("connector_type", &model.connector_type))?;

    Ok(ChargingStation {
        id,
        name: model.name,
        location: Location {
            latitude: model.latitude,
            longitude: model.longitude,
        },
        status,
        power_output: model.power_output,
        connector_type,
        created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn expanded_to_domain(
    (station, creator): (charging_station::Model, Option<user::Model>),
) -> DomainResult<ExpandedStation> {
    let creator = match creator {
        Some(model) => Some(UserSummary::from(&user_model_to_domain(model)?)),
        None => None,
    };
    Ok(ExpandedStation {
        station: model_to_domain(station)?,
        creator,
    })
}

fn domain_to_active(station: &ChargingStation) -> charging_station::ActiveModel {
    charging_station::ActiveModel {
        id: Set(station.id.to_string()),
        name: Set(station.name.clone()),
        latitude: Set(station.location.latitude),
        longitude: Set(station.location.longitude),
        status: Set(station.status.as_str().to_string()),
        power_output: Set(station.power_output),
        connector_type: Set(station.connector_type.as_str().to_string()),
        created_by: Set(station.created_by.to_string()),
        created_at: Set(station.created_at),
        updated_at: Set(station.updated_at),
    }
}

fn sort_column(field: SortField) -> charging_station::Column {
    match field {
        SortField::Name => charging_station::Column::Name,
        SortField::Status => charging_station::Column::Status,
        SortField::PowerOutput => charging_station::Column::PowerOutput,
        SortField::ConnectorType => charging_station::Column::ConnectorType,
        SortField::CreatedAt => charging_station::Column::CreatedAt,
        SortField::UpdatedAt => charging_station::Column::UpdatedAt,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ChargingStationRepository for SeaOrmChargingStationRepository {
    async fn insert(&self, station: &ChargingStation) -> DomainResult<()> {
        debug!("Inserting charging station {}", station.id);
        charging_station::Entity::insert(domain_to_active(station))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<ChargingStation>> {
        let model = charging_station::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(model_to_domain).transpose()
    }

    async fn find_expanded(&self, id: Uuid) -> DomainResult<Option<ExpandedStation>> {
        let row = charging_station::Entity::find_by_id(id.to_string())
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        row.map(expanded_to_domain).transpose()
    }

    async fn list(&self, query: &StationQuery) -> DomainResult<PaginatedResult<ExpandedStation>> {
        let filter = &query.filter;
        let mut select = charging_station::Entity::find();

        if let Some(status) = filter.status {
            select = select.filter(charging_station::Column::Status.eq(status.as_str()));
        }
        if let Some(connector_type) = filter.connector_type {
            select = select
                .filter(charging_station::Column::ConnectorType.eq(connector_type.as_str()));
        }
        if let Some(min) = filter.min_power {
            select = select.filter(charging_station::Column::PowerOutput.gte(min));
        }
        if let Some(max) = filter.max_power {
            select = select.filter(charging_station::Column::PowerOutput.lte(max));
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let order = match query.sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        let page = query.pagination;

        let rows = select
            .order_by(sort_column(query.sort.field), order)
            .order_by_asc(charging_station::Column::CreatedAt)
            .order_by_asc(charging_station::Column::Id)
            .offset(page.offset())
            .limit(page.limit as u64)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        debug!(
            "Listed {} of {} charging stations (page {})",
            rows.len(),
            total,
            page.page
        );

        let items = rows
            .into_iter()
            .map(expanded_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn update(&self, station: &ChargingStation) -> DomainResult<()> {
        debug!("Updating charging station {}", station.id);
        charging_station::Entity::update(domain_to_active(station))
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => DomainError::NotFound {
                    entity: "ChargingStation",
                    field: "id",
                    value: station.id.to_string(),
                },
                other => db_err(other),
            })?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = charging_station::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        debug!("Deleted charging station {} ({} rows)", id, result.rows_affected);
        Ok(result.rows_affected > 0)
    }
}
