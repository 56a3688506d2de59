//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::charging_station::ChargingStationRepository;
use super::user::UserRepositoryInterface;
use crate::shared::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let station = repos.charging_stations().find_by_id(id).await?;
///     let owner = repos.users().get_user_by_id(station.created_by).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepositoryInterface;
    fn charging_stations(&self) -> &dyn ChargingStationRepository;

    /// Round-trip to the backing store, used by the health check.
    async fn ping(&self) -> DomainResult<()>;
}
