//! # HTTP Request Handlers Module
//!
//! Spring MVC의 Controller 레이어에 해당합니다. 핸들러는 요청을 DTO로 받아
//! 서비스를 호출하고, 결과를 [`ApiResponse`](crate::domain::dto::ApiResponse) 봉투로 돌려줍니다.
//! 서비스는 `web::Data`로 주입됩니다.
//!
//! ```text
//! Client ──► Handlers (이 모듈) ──► Services ──► Repositories
//! ```
//!
//! - [`users`] - `/user/**` 인증/계정 엔드포인트
//! - [`rsa`] - `/.well-known/jwks.json`

pub mod users;
pub mod rsa;
