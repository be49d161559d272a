//! User Entity Implementation
//!
//! 인보이스 매니저 사용자 계정 엔티티입니다. `users` 컬렉션의 문서 구조와 같습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::role::ROLE_USER;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    /// 항상 trim + 소문자로 저장됩니다.
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// 이메일 인증 완료 여부
    pub enabled: bool,
    pub not_locked: bool,
    pub using_mfa: bool,
    pub role_name: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새로 가입한 사용자를 만듭니다.
    ///
    /// 이메일 인증 전이므로 `enabled = false`, 기본 역할은 `ROLE_USER`입니다.
    pub fn new_registered(first_name: String, last_name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            first_name,
            last_name,
            email,
            password_hash,
            address: None,
            phone: None,
            title: None,
            bio: None,
            image_url: None,
            enabled: false,
            not_locked: true,
            using_mfa: false,
            role_name: ROLE_USER.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_locked(&self) -> bool {
        !self.not_locked
    }
}
