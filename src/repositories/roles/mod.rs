//! 역할 데이터 액세스 계층

pub mod role_repo;
pub mod memory;

pub use role_repo::{MongoRoleRepository, RoleRepository, ROLES_COLLECTION};
pub use memory::InMemoryRoleRepository;
