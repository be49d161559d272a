//! 도메인 모델
//!
//! 저장되지 않고 요청 처리 중에만 쓰이는 값 타입들입니다.
//!
//! - [`auth`] - 인증된 사용자, 권한 요구사항, `UserPrincipal`
//! - [`token`] - JWT 클레임과 토큰 쌍

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;
