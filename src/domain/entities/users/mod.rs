//! 사용자와 역할 엔티티

pub mod user;
pub mod role;

pub use user::User;
pub use role::*;
