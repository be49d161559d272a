//! 사용자 데이터 액세스 계층
//!
//! [`UserRepository`] trait과 MongoDB / 메모리 구현을 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let repo: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(database));
//! let user = repo.find_by_email("user@example.com").await?;
//! ```

pub mod user_repo;
pub mod memory;

pub use user_repo::{MongoUserRepository, UserRepository, EMAIL_IN_USE_MESSAGE, USERS_COLLECTION};
pub use memory::InMemoryUserRepository;
