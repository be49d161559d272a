//! 사용자 요청 DTO (클라이언트 → 서버)

pub mod auth_request;
pub mod create_user_request;

pub use auth_request::LoginRequest;
pub use create_user_request::CreateUserRequest;
