//! # Core Framework Module
//!
//! 애플리케이션 전역에서 쓰이는 에러 타입과 서비스 레지스트리를 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 서비스 레지스트리
//! - **ServiceLocator**: 타입 기반 인스턴스 저장소 (Spring의 ApplicationContext 역할)
//! - **Repository**: 시작 시 인덱스 생성/기본 데이터 시드를 수행하는 초기화 훅
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 모든 계층의 실패를 표현하는 단일 열거형
//! - **ResponseError**: `AppError` → JSON 응답 봉투 변환 (유일한 에러 변환 지점)
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 프로젝트 |
//! |--------|---------------|
//! | `ApplicationContext` | `ServiceLocator` |
//! | `@Autowired` | `web::Data<T>` / 생성자 `Arc<T>` |
//! | `InitializingBean` | `Repository::init` |
//! | `@ExceptionHandler` | `AppError::error_response()` |

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
