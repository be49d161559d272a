//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 오가는 데이터 구조를 정의합니다.
//! Spring의 `@RequestBody` / `@ResponseBody` 클래스에 해당하며,
//! 입력 검증은 `validator` 크레이트로 수행합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── api_response.rs     # 공통 응답 봉투
//! └── users/
//!     ├── request/        # 가입, 로그인 요청
//!     └── response/       # UserDto
//! ```

pub mod api_response;
pub mod users;

pub use api_response::ApiResponse;
pub use users::*;
