//! 메모리 기반 역할 리포지토리

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::errors::AppResult;
use crate::domain::entities::users::Role;
use crate::repositories::roles::role_repo::RoleRepository;

pub struct InMemoryRoleRepository {
    roles: Arc<RwLock<HashMap<String, Role>>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self {
            roles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// 기본 역할이 미리 들어 있는 저장소
    pub fn with_default_roles() -> Self {
        let roles = Role::defaults()
            .into_iter()
            .map(|role| (role.name.clone(), role))
            .collect();

        Self {
            roles: Arc::new(RwLock::new(roles)),
        }
    }
}

impl Default for InMemoryRoleRepository {
    fn default() -> Self {
        Self::with_default_roles()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.get(name).cloned())
    }

    async fn upsert(&self, role: &Role) -> AppResult<()> {
        let mut roles = self.roles.write().await;
        roles.insert(role.name.clone(), role.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::{ROLE_SYSADMIN, ROLE_USER};

    #[actix_web::test]
    async fn test_default_roles_are_available() {
        let repo = InMemoryRoleRepository::with_default_roles();

        let user_role = repo.find_by_name(ROLE_USER).await.unwrap().unwrap();
        assert_eq!(user_role.permission, "READ:USER,READ:CUSTOMER");
        assert!(repo.find_by_name(ROLE_SYSADMIN).await.unwrap().is_some());
        assert!(repo.find_by_name("ROLE_GUEST").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_upsert_replaces_permission() {
        let repo = InMemoryRoleRepository::new();
        repo.upsert(&Role::new("ROLE_X", "READ:USER")).await.unwrap();
        repo.upsert(&Role::new("ROLE_X", "READ:USER,UPDATE:USER")).await.unwrap();

        let role = repo.find_by_name("ROLE_X").await.unwrap().unwrap();
        assert_eq!(role.authorities().len(), 2);
    }
}
