//! Charging station service
//!
//! Create, read, list, update and delete with ownership checks.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::charging_station::{
    validate_new_station, validate_station_patch, ChargingStation, ExpandedStation,
    ListStationsQuery, StationInput,
};
use crate::domain::{Actor, DomainError, DomainResult, RepositoryProvider};
use crate::shared::PaginatedResult;

const ENTITY: &str = "ChargingStation";

/// Parse a client-supplied station id.
pub fn parse_station_id(raw: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| DomainError::InvalidId {
        entity: ENTITY,
        value: raw.to_string(),
    })
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity: ENTITY,
        field: "id",
        value: id.to_string(),
    }
}

pub struct ChargingStationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ChargingStationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, input: StationInput, actor: &Actor) -> DomainResult<ExpandedStation> {
        let fields = validate_new_station(input)?;
        let station = ChargingStation::new(fields, actor.id);

        self.repos.charging_stations().insert(&station).await?;
        info!(station_id = %station.id, created_by = %actor.id, "Charging station created");

        self.expanded(station.id).await
    }

    pub async fn list(&self, params: ListStationsQuery) -> DomainResult<PaginatedResult<ExpandedStation>> {
        let query = params.parse()?;
        self.repos.charging_stations().list(&query).await
    }

    pub async fn get_by_id(&self, id: &str) -> DomainResult<ExpandedStation> {
        let id = parse_station_id(id)?;
        self.expanded(id).await
    }

    /// Overwrite the fields present in `input`. Only the creator or an
    /// admin may update.
    pub async fn update(
        &self,
        id: &str,
        input: StationInput,
        actor: &Actor,
    ) -> DomainResult<ExpandedStation> {
        let id = parse_station_id(id)?;
        let patch = validate_station_patch(input)?;

        let mut station = self.owned_by(id, actor, "update").await?;
        station.apply(patch);
        self.repos.charging_stations().update(&station).await?;
        info!(station_id = %id, actor = %actor.id, "Charging station updated");

        self.expanded(id).await
    }

    pub async fn delete(&self, id: &str, actor: &Actor) -> DomainResult<()> {
        let id = parse_station_id(id)?;
        self.owned_by(id, actor, "delete").await?;

        if !self.repos.charging_stations().delete(id).await? {
            return Err(not_found(id));
        }
        info!(station_id = %id, actor = %actor.id, "Charging station deleted");
        Ok(())
    }

    async fn owned_by(&self, id: Uuid, actor: &Actor, action: &str) -> DomainResult<ChargingStation> {
        let station = self
            .repos
            .charging_stations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        if !station.can_be_modified_by(actor) {
            return Err(DomainError::Forbidden(format!(
                "Not authorized to {} this charging station",
                action
            )));
        }
        Ok(station)
    }

    async fn expanded(&self, id: Uuid) -> DomainResult<ExpandedStation> {
        self.repos
            .charging_stations()
            .find_expanded(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::charging_station::{ConnectorType, LocationInput, StationStatus};
    use crate::domain::user::CreateUserDto;
    use crate::domain::{User, UserRole};
    use crate::infrastructure::InMemoryStorage;

    struct Fixture {
        service: ChargingStationService,
        owner: User,
        stranger: User,
        admin: User,
    }

    async fn fixture() -> Fixture {
        let storage = Arc::new(InMemoryStorage::new());
        let mut users = Vec::new();
        for (email, role) in [
            ("owner@example.com", UserRole::User),
            ("stranger@example.com", UserRole::User),
            ("admin@example.com", UserRole::Admin),
        ] {
            let user = storage
                .users()
                .create_user(CreateUserDto {
                    name: email.split('@').next().unwrap_or_default().to_string(),
                    email: email.into(),
                    password_hash: "hash".into(),
                    role,
                })
                .await
                .unwrap();
            users.push(user);
        }
        let admin = users.pop().unwrap();
        let stranger = users.pop().unwrap();
        let owner = users.pop().unwrap();

        Fixture {
            service: ChargingStationService::new(storage),
            owner,
            stranger,
            admin,
        }
    }

    fn input(name: &str, power: f64) -> StationInput {
        StationInput {
            name: Some(name.into()),
            location: Some(LocationInput {
                latitude: Some(40.0.into()),
                longitude: Some((-73.0).into()),
            }),
            status: Some("Active".into()),
            power_output: Some(power.into()),
            connector_type: Some("CCS".into()),
        }
    }

    #[tokio::test]
    async fn create_persists_input_with_server_fields() {
        let f = fixture().await;
        let created = f
            .service
            .create(input("Main St", 50.0), &f.owner.actor())
            .await
            .unwrap();

        let s = &created.station;
        assert_eq!(s.name, "Main St");
        assert_eq!(s.location.latitude, 40.0);
        assert_eq!(s.location.longitude, -73.0);
        assert_eq!(s.status, StationStatus::Active);
        assert_eq!(s.power_output, 50.0);
        assert_eq!(s.connector_type, ConnectorType::Ccs);
        assert_eq!(s.created_by, f.owner.id);
        assert_eq!(created.creator.as_ref().unwrap().email, "owner@example.com");

        let fetched = f.service.get_by_id(&s.id.to_string()).await.unwrap();
        assert_eq!(fetched.station, created.station);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_without_persisting() {
        let f = fixture().await;
        let err = f
            .service
            .create(input("Main St", 500.0), &f.owner.actor())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let page = f.service.list(ListStationsQuery::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn malformed_and_missing_ids() {
        let f = fixture().await;
        assert!(matches!(
            f.service.get_by_id("not-a-valid-id-format").await,
            Err(DomainError::InvalidId { .. })
        ));
        assert!(matches!(
            f.service.get_by_id(&Uuid::new_v4().to_string()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn non_owner_update_is_forbidden_and_leaves_record() {
        let f = fixture().await;
        let created = f
            .service
            .create(input("Main St", 50.0), &f.owner.actor())
            .await
            .unwrap();
        let id = created.station.id.to_string();

        let patch = StationInput {
            name: Some("Hijacked".into()),
            ..Default::default()
        };
        let err = f
            .service
            .update(&id, patch, &f.stranger.actor())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let unchanged = f.service.get_by_id(&id).await.unwrap();
        assert_eq!(unchanged.station, created.station);
    }

    #[tokio::test]
    async fn owner_and_admin_can_update() {
        let f = fixture().await;
        let created = f
            .service
            .create(input("Main St", 50.0), &f.owner.actor())
            .await
            .unwrap();
        let id = created.station.id.to_string();

        let updated = f
            .service
            .update(
                &id,
                StationInput {
                    status: Some("Maintenance".into()),
                    ..Default::default()
                },
                &f.owner.actor(),
            )
            .await
            .unwrap();
        assert_eq!(updated.station.status, StationStatus::Maintenance);
        assert_eq!(updated.station.name, "Main St");
        assert_eq!(updated.station.created_by, f.owner.id);

        let by_admin = f
            .service
            .update(
                &id,
                StationInput {
                    power_output: Some(150.0.into()),
                    ..Default::default()
                },
                &f.admin.actor(),
            )
            .await
            .unwrap();
        assert_eq!(by_admin.station.power_output, 150.0);
        assert_eq!(by_admin.station.created_by, f.owner.id);
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let f = fixture().await;
        let created = f
            .service
            .create(input("Main St", 50.0), &f.owner.actor())
            .await
            .unwrap();
        let id = created.station.id.to_string();

        assert!(matches!(
            f.service.delete(&id, &f.stranger.actor()).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(f.service.get_by_id(&id).await.is_ok());

        f.service.delete(&id, &f.owner.actor()).await.unwrap();
        assert!(matches!(
            f.service.delete(&id, &f.owner.actor()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_applies_power_range_and_pagination() {
        let f = fixture().await;
        for (i, power) in [5.0, 10.0, 22.0, 50.0, 51.0, 150.0].into_iter().enumerate() {
            f.service
                .create(input(&format!("s{i}"), power), &f.owner.actor())
                .await
                .unwrap();
        }

        let page = f
            .service
            .list(ListStationsQuery {
                min_power: Some(10.0),
                max_power: Some(50.0),
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert!(page
            .items
            .iter()
            .all(|e| (10.0..=50.0).contains(&e.station.power_output)));
    }
}
