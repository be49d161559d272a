//! # 사용자 리포지토리
//!
//! [`UserRepository`] trait과 MongoDB 구현입니다.
//! 이메일은 서비스 계층에서 정규화(trim + 소문자)된 값만 들어온다고 가정합니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use mongodb::bson::{doc, DateTime};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::users::User;

pub const USERS_COLLECTION: &str = "users";

pub const EMAIL_IN_USE_MESSAGE: &str = "Email already in use. Please use a different email and try again";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 새 사용자를 저장하고 id가 채워진 엔티티를 돌려줍니다.
    /// 이메일이 이미 있으면 `ApiError(EMAIL_IN_USE_MESSAGE)`입니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// 사용자가 없으면 `false`
    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<bool>;

    /// 사용자가 없으면 `false`
    async fn update_enabled(&self, email: &str, enabled: bool) -> AppResult<bool>;
}

pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(USERS_COLLECTION)
    }

    async fn set_fields(&self, email: &str, fields: mongodb::bson::Document) -> AppResult<bool> {
        let mut fields = fields;
        fields.insert("updated_at", DateTime::now());

        let result = self
            .collection()
            .update_one(doc! { "email": email }, doc! { "$set": fields })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.matched_count > 0)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).name("email_unique".to_string()).build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder().name("created_at_desc".to_string()).build())
            .build();

        self.collection()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let result = self.collection().insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ApiError(EMAIL_IN_USE_MESSAGE.to_string())
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("inserted_id is not an ObjectId".to_string()))?;
        user.id = Some(id);

        Ok(user)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> AppResult<bool> {
        self.set_fields(email, doc! { "password_hash": password_hash }).await
    }

    async fn update_enabled(&self, email: &str, enabled: bool) -> AppResult<bool> {
        self.set_fields(email, doc! { "enabled": enabled }).await
    }
}

#[async_trait]
impl Repository for MongoUserRepository {
    fn name(&self) -> &str {
        "user"
    }

    fn collection_name(&self) -> &str {
        USERS_COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await?;
        info!("📇 users 인덱스 확인 완료");
        Ok(())
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}
