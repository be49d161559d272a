//! 데이터 액세스 계층
//!
//! 각 저장소는 `async_trait` trait으로 정의되고, 서비스는 `Arc<dyn Trait>`로 의존합니다.
//! 운영 환경에서는 MongoDB/Redis 구현을, 로컬 실행과 테스트에서는 메모리 구현을 사용합니다.
//!
//! | Trait | 운영 구현 | 메모리 구현 |
//! |-------|-----------|-------------|
//! | [`users::UserRepository`] | `MongoUserRepository` | `InMemoryUserRepository` |
//! | [`roles::RoleRepository`] | `MongoRoleRepository` | `InMemoryRoleRepository` |
//! | [`verifications::VerificationRepository`] | `RedisVerificationRepository` | `InMemoryVerificationRepository` |

pub mod users;
pub mod roles;
pub mod verifications;
