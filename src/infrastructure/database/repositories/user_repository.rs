use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{db_err, is_unique_violation};
use crate::domain::user::CreateUserDto;
use crate::domain::{DomainError, DomainResult, User, UserRepositoryInterface, UserRole};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::User => UserRole::User,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::User => user::UserRole::User,
    }
}

pub(crate) fn user_model_to_domain(model: user::Model) -> DomainResult<User> {
    let id = Uuid::parse_str(&model.id)
        .map_err(|_| DomainError::Storage(format!("Corrupt user id in database: {}", model.id)))?;

    Ok(User {
        id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();
        let id = Uuid::new_v4();

        let new_user = user::ActiveModel {
            id: Set(id.to_string()),
            name: Set(dto.name),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            role: Set(domain_role_to_entity(dto.role)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("User already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        debug!("Created user {}", model.id);
        user_model_to_domain(model)
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(user_model_to_domain).transpose()
    }

    async fn get_user_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(user_model_to_domain).transpose()
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
