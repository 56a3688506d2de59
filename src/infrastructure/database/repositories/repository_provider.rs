//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::domain::charging_station::ChargingStationRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepositoryInterface;
use crate::domain::DomainResult;

use super::charging_station_repository::SeaOrmChargingStationRepository;
use super::db_err;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let station = repos.charging_stations().find_by_id(id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    users: SeaOrmUserRepository,
    charging_stations: SeaOrmChargingStationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            charging_stations: SeaOrmChargingStationRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn charging_stations(&self) -> &dyn ChargingStationRepository {
        &self.charging_stations
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db.execute_unprepared("SELECT 1").await.map_err(db_err)?;
        Ok(())
    }
}
