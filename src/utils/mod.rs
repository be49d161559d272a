//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 이메일 정규화, 필수/선택 문자열 정리
//!
//! ```rust,ignore
//! use crate::utils::string_utils::normalize_email;
//!
//! let email = normalize_email(&request.email);
//! ```

pub mod string_utils;
