//! 인증 및 보안 서비스 모듈
//!
//! - [`token_service`] - JWT 액세스/리프레시 토큰 발급과 검증 (HS512 또는 RS256)
//! - [`rsa_keys`] - RS256 키 쌍 로드/생성과 JWKS
//! - [`authentication_service`] - 로그인, MFA 코드 확인, 토큰 갱신
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthenticationService, LoginOutcome};
//!
//! match auth_service.login(&request.email, &request.password).await? {
//!     LoginOutcome::Authenticated { access_token, .. } => { /* ... */ }
//!     LoginOutcome::VerificationRequired { user } => { /* 코드 메일 발송됨 */ }
//! }
//! ```

pub mod authentication_service;
pub mod rsa_keys;
pub mod token_service;

pub use authentication_service::*;
pub use rsa_keys::RsaKeyPair;
pub use token_service::*;
