//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 시작 시 한 번 만들어져 [`ServiceLocator`](crate::core::registry::ServiceLocator)에
//! 등록되고, 핸들러에는 `web::Data`로 전달됩니다. 서비스 자체는 가변 상태를 갖지 않습니다.
//!
//! - [`users`] - 가입, 계정 인증, 비밀번호 재설정, MFA 코드
//! - [`auth`] - 로그인, 토큰 발급/검증/갱신
//! - [`mail`] - 메일 발송기

pub mod users;
pub mod auth;
pub mod mail;
