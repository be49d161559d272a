//! 도메인 엔티티
//!
//! 저장소에 영속되는 데이터 구조입니다.
//!
//! - [`users`] - 사용자 계정과 역할
//! - [`verifications`] - 일회용 검증 링크/코드 레코드

pub mod users;
pub mod verifications;

pub use users::*;
pub use verifications::*;
