//! 인증 관련 모델

pub mod authenticated_user;
pub mod authentication_request;
pub mod user_principal;

pub use authenticated_user::AuthenticatedUser;
pub use authentication_request::RequiredAuthority;
pub use user_principal::UserPrincipal;
