//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod charging_station_repository;
pub mod repository_provider;
pub mod user_repository;

pub use charging_station_repository::SeaOrmChargingStationRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

pub(crate) fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
