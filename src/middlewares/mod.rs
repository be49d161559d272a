//! 미들웨어 모듈
//!
//! Spring Boot의 Filter와 유사하게 보호된 라우트 앞에서 인증/인가를 처리합니다.
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::resource("/profile")
//!     .wrap(AuthMiddleware::required_with_authority("READ:USER"))
//!     .route(web::get().to(profile));
//! ```
//!
//! 미들웨어는 `web::Data<TokenService>`를 app data에서 찾습니다.

pub mod auth_middleware;
mod auth_inner;

pub use auth_inner::PERMISSION_DENIED_MESSAGE;
pub use auth_middleware::AuthMiddleware;
