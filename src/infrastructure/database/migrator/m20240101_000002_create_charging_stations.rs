//! Create charging_stations table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChargingStations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChargingStations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChargingStations::Latitude).double().not_null())
                    .col(ColumnDef::new(ChargingStations::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(ChargingStations::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::PowerOutput)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::ConnectorType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ChargingStations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_charging_stations_created_by")
                            .from(ChargingStations::Table, ChargingStations::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Status and connector type are the common list filters
        manager
            .create_index(
                Index::create()
                    .name("idx_charging_stations_status")
                    .table(ChargingStations::Table)
                    .col(ChargingStations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_charging_stations_connector_type")
                    .table(ChargingStations::Table)
                    .col(ChargingStations::ConnectorType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChargingStations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ChargingStations {
    Table,
    Id,
    Name,
    Latitude,
    Longitude,
    Status,
    PowerOutput,
    ConnectorType,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
