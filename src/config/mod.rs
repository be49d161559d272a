//! # Configuration Module
//!
//! 백엔드 서비스의 설정을 환경 변수에서 읽어오는 모듈입니다.
//! Spring의 `@Configuration` / `@Value` 조합과 같은 역할을 하며,
//! 설정값은 `.env.{profile}` 파일 또는 프로세스 환경 변수로 제공합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 저장소, 서버, 요청 제한, CORS
//! - [`auth_config`] - JWT 서명, 검증 코드/링크 수명, 메일 발송
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, JwtConfig};
//!
//! let env = Environment::current();
//! let address = ServerConfig::bind_address();
//! let access_minutes = JwtConfig::access_token_minutes();
//! ```
//!
//! ## Spring과의 비교
//!
//! | Spring | Rust (이 프로젝트) |
//! |--------|-------------------|
//! | `@Configuration` | `pub struct JwtConfig` |
//! | `@Value("${property}")` | `env::var("PROPERTY")` |
//! | `@Profile("dev")` | `Environment::Development` |
//! | `application.yml` | `.env` 파일 |

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
