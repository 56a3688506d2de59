//! User aggregate
//!
//! Contains the User entity, the request actor, and the repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use model::{Actor, User, UserRole, UserSummary};

pub use dto_create::CreateUserDto;

pub use repository::UserRepositoryInterface;
