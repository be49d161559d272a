//! 역할(Role) 엔티티
//!
//! 역할은 이름과 쉼표로 구분된 권한 문자열로 구성되며 런타임에는 읽기 전용입니다.

use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_MANAGER: &str = "ROLE_MANAGER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_SYSADMIN: &str = "ROLE_SYSADMIN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    /// 예: `"READ:USER,READ:CUSTOMER"`
    pub permission: String,
}

impl Role {
    pub fn new(name: &str, permission: &str) -> Self {
        Self {
            name: name.to_string(),
            permission: permission.to_string(),
        }
    }

    /// 권한 문자열을 `,` 기준으로 나눈 권한 목록. 빈 항목은 버립니다.
    pub fn authorities(&self) -> Vec<String> {
        self.permission
            .split(',')
            .map(str::trim)
            .filter(|authority| !authority.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 시작 시 시드되는 기본 역할들
    pub fn defaults() -> Vec<Role> {
        vec![
            Role::new(ROLE_USER, "READ:USER,READ:CUSTOMER"),
            Role::new(ROLE_MANAGER, "READ:USER,READ:CUSTOMER,UPDATE:USER,UPDATE:CUSTOMER"),
            Role::new(
                ROLE_ADMIN,
                "READ:USER,READ:CUSTOMER,CREATE:USER,CREATE:CUSTOMER,UPDATE:USER,UPDATE:CUSTOMER",
            ),
            Role::new(
                ROLE_SYSADMIN,
                "READ:USER,READ:CUSTOMER,CREATE:USER,CREATE:CUSTOMER,UPDATE:USER,UPDATE:CUSTOMER,DELETE:USER,DELETE:CUSTOMER",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorities_split_and_trim() {
        let role = Role::new("ROLE_TEST", " READ:USER , ,UPDATE:USER,");
        assert_eq!(role.authorities(), vec!["READ:USER".to_string(), "UPDATE:USER".to_string()]);
    }

    #[test]
    fn test_default_roles_are_cumulative() {
        let roles = Role::defaults();
        let names: Vec<&str> = roles.iter().map(|role| role.name.as_str()).collect();
        assert_eq!(names, vec![ROLE_USER, ROLE_MANAGER, ROLE_ADMIN, ROLE_SYSADMIN]);

        for pair in roles.windows(2) {
            let lower = pair[0].authorities();
            let higher = pair[1].authorities();
            assert!(lower.iter().all(|authority| higher.contains(authority)));
        }
        assert!(roles[3].authorities().contains(&"DELETE:CUSTOMER".to_string()));
    }
}
