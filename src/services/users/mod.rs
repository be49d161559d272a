//! 사용자 관리 서비스 모듈
//!
//! 가입, 자격 증명 확인, 계정 인증, 비밀번호 재설정, MFA 코드를 담당합니다.

pub mod user_service;

pub use user_service::*;
