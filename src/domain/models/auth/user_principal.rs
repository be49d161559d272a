//! 인증 판단과 토큰 발급에 쓰는 사용자 + 역할 묶음
//!
//! Spring Security의 `UserDetails`와 같은 역할입니다.

use crate::domain::dto::users::UserDto;
use crate::domain::entities::users::{Role, User};

#[derive(Debug, Clone)]
pub struct UserPrincipal {
    pub user: User,
    pub role: Role,
}

impl UserPrincipal {
    pub fn new(user: User, role: Role) -> Self {
        Self { user, role }
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }

    pub fn authorities(&self) -> Vec<String> {
        self.role.authorities()
    }

    pub fn is_enabled(&self) -> bool {
        self.user.enabled
    }

    pub fn is_account_non_locked(&self) -> bool {
        self.user.not_locked
    }

    pub fn to_dto(&self) -> UserDto {
        UserDto::from_user(self.user.clone(), Some(&self.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_exposes_role_authorities() {
        let mut user = User::new_registered(
            "Ana".to_string(),
            "Petrovic".to_string(),
            "ana@example.com".to_string(),
            "hash".to_string(),
        );
        user.not_locked = false;
        let principal = UserPrincipal::new(user, Role::new("ROLE_MANAGER", "READ:USER,UPDATE:USER"));

        assert_eq!(principal.authorities(), vec!["READ:USER".to_string(), "UPDATE:USER".to_string()]);
        assert!(!principal.is_enabled());
        assert!(!principal.is_account_non_locked());
        assert_eq!(principal.to_dto().permissions, "READ:USER,UPDATE:USER");
    }
}
