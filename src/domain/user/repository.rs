use async_trait::async_trait;
use uuid::Uuid;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Fails with `DomainError::Conflict` when the email is already taken.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;
    async fn count_users(&self) -> DomainResult<u64>;
}
