//! 메모리 기반 사용자 리포지토리 (`STORAGE_BACKEND=memory`, 테스트)

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use tokio::sync::RwLock;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::User;
use crate::repositories::users::user_repo::{UserRepository, EMAIL_IN_USE_MESSAGE};

/// 이메일을 키로 사용자를 보관합니다.
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn modify<F>(&self, email: &str, apply: F) -> AppResult<bool>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                apply(user);
                user.updated_at = DateTime::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(AppError::ApiError(EMAIL_IN_USE_MESSAGE.to_string()));
        }

        user.id = Some(user.id.unwrap_or_else(ObjectId::new));
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<bool> {
        let password_hash = password_hash.to_string();
        self.modify(email, move |user| user.password_hash = password_hash).await
    }

    async fn update_enabled(&self, email: &str, enabled: bool) -> AppResult<bool> {
        self.modify(email, move |user| user.enabled = enabled).await
    }
}
