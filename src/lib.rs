//! 인보이스 매니저 인증 백엔드
//!
//! 인보이스 관리 애플리케이션의 가입, 로그인(선택적 MFA 코드), 비밀번호 재설정,
//! 계정 인증, JWT 액세스/리프레시 토큰 발급을 제공하는 REST 서비스입니다.
//!
//! # Features
//!
//! - **사용자 관리**: 가입, 이메일 계정 인증, 프로필 조회
//! - **JWT 인증**: HS512(기본) 또는 RS256 + JWKS, 상태 없는 액세스/리프레시 토큰
//! - **MFA**: 메일로 발송되는 일회용 코드
//! - **비밀번호 재설정**: 만료되는 일회용 링크
//! - **MongoDB**: 사용자/역할 저장
//! - **Redis**: 검증 키/코드 저장 (TTL, 원자적 소비)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, ApiResponse 봉투
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 토큰, 메일
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스 (trait + Mongo/Redis/메모리 구현)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use invoice_manager_backend::services::auth::{AuthenticationService, LoginOutcome};
//!
//! match auth_service.login("ana@example.com", "secret").await? {
//!     LoginOutcome::Authenticated { access_token, refresh_token, .. } => { /* ... */ }
//!     LoginOutcome::VerificationRequired { user } => { /* 코드 확인 필요 */ }
//! }
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
