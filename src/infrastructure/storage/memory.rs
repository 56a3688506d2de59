//! In-memory storage implementation

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::charging_station::{
    ChargingStation, ChargingStationRepository, ExpandedStation, StationQuery,
};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::{CreateUserDto, UserRepositoryInterface};
use crate::domain::{DomainError, DomainResult, User, UserSummary};
use crate::shared::PaginatedResult;

/// In-memory storage for development and testing
pub struct InMemoryStorage {
    users: DashMap<Uuid, User>,
    /// email -> user id
    emails: DashMap<String, Uuid>,
    stations: DashMap<Uuid, ChargingStation>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            stations: DashMap::new(),
        }
    }

    fn expand(&self, station: ChargingStation) -> ExpandedStation {
        let creator = self
            .users
            .get(&station.created_by)
            .map(|u| UserSummary::from(u.value()));
        ExpandedStation { station, creator }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryStorage {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: dto.name,
            email: dto.email,
            password_hash: dto.password_hash,
            role: dto.role,
            created_at: now,
            updated_at: now,
        };

        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict("User already exists".to_string()))
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|r| *r.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn get_user_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }
}

#[async_trait]
impl ChargingStationRepository for InMemoryStorage {
    async fn insert(&self, station: &ChargingStation) -> DomainResult<()> {
        match self.stations.entry(station.id) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "Charging station {} already exists",
                station.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(station.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<ChargingStation>> {
        Ok(self.stations.get(&id).map(|s| s.value().clone()))
    }

    async fn find_expanded(&self, id: Uuid) -> DomainResult<Option<ExpandedStation>> {
        let station = self.stations.get(&id).map(|s| s.value().clone());
        Ok(station.map(|s| self.expand(s)))
    }

    async fn list(&self, query: &StationQuery) -> DomainResult<PaginatedResult<ExpandedStation>> {
        let mut matching: Vec<ChargingStation> = self
            .stations
            .iter()
            .filter(|s| query.filter.matches(s.value()))
            .map(|s| s.value().clone())
            .collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let page = query.pagination;
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .map(|s| self.expand(s))
            .collect();

        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn update(&self, station: &ChargingStation) -> DomainResult<()> {
        match self.stations.get_mut(&station.id) {
            Some(mut existing) => {
                *existing = station.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                entity: "ChargingStation",
                field: "id",
                value: station.id.to_string(),
            }),
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.stations.remove(&id).is_some())
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryStorage {
    fn users(&self) -> &dyn UserRepositoryInterface {
        self
    }

    fn charging_stations(&self) -> &dyn ChargingStationRepository {
        self
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}
