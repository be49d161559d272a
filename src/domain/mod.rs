//! # Domain Layer Module
//!
//! 도메인 계층입니다. Spring 프로젝트의 Entity / DTO / 값 객체 패키지에 해당합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 영속 객체 (User, Role, VerificationRecord)
//! ├── dto       - API 요청/응답 (CreateUserRequest, LoginRequest, UserDto, ApiResponse)
//! └── models    - 요청 처리 중에만 쓰는 값 (TokenClaims, AuthenticatedUser, UserPrincipal)
//! ```
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `@Entity` | `entities` 모듈 |
//! | `@RequestBody` / `@ResponseBody` | `dto` 모듈 |
//! | `UserDetails` | `models::auth::UserPrincipal` |
//! | `@Valid` | `validator::Validate` |

pub mod entities;
pub mod dto;
pub mod models;
