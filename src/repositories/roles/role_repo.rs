//! 역할 리포지토리
//!
//! 역할은 런타임에 읽기 전용이며, 시작 시 [`Role::defaults`]가 upsert 됩니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use mongodb::bson::doc;
use mongodb::options::{IndexOptions, ReplaceOptions};
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::Repository;
use crate::db::Database;
use crate::domain::entities::users::Role;

pub const ROLES_COLLECTION: &str = "roles";

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// 같은 이름의 역할이 있으면 권한 문자열을 교체합니다.
    async fn upsert(&self, role: &Role) -> AppResult<()>;
}

pub struct MongoRoleRepository {
    db: Arc<Database>,
}

impl MongoRoleRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Role> {
        self.db.get_database().collection::<Role>(ROLES_COLLECTION)
    }
}

#[async_trait]
impl RoleRepository for MongoRoleRepository {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        self.collection()
            .find_one(doc! { "name": name })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn upsert(&self, role: &Role) -> AppResult<()> {
        self.collection()
            .replace_one(doc! { "name": role.name.as_str() }, role)
            .with_options(ReplaceOptions::builder().upsert(true).build())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl Repository for MongoRoleRepository {
    fn name(&self) -> &str {
        "role"
    }

    fn collection_name(&self) -> &str {
        ROLES_COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).name("name_unique".to_string()).build())
            .build();

        self.collection()
            .create_index(name_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let defaults = Role::defaults();
        for role in &defaults {
            self.upsert(role).await?;
        }

        info!("🌱 기본 역할 {}개 시드 완료", defaults.len());
        Ok(())
    }
}
