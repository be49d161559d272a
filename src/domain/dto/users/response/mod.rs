//! 사용자 응답 DTO (서버 → 클라이언트)

pub mod user_response;

pub use user_response::UserDto;
