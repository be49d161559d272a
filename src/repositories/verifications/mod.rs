//! 검증 링크/코드 저장소
//!
//! Redis(TTL + `GETDEL`) 구현과 메모리 구현을 제공합니다.

pub mod verification_repo;
pub mod memory;

pub use verification_repo::{RedisVerificationRepository, VerificationRepository, EXPIRED_RECORD_RETENTION_SECS};
pub use memory::InMemoryVerificationRepository;
