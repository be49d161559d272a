//! 사용자 응답 DTO
//!
//! `User` + `Role`의 읽기 전용 투영입니다. 비밀번호 해시는 절대 포함하지 않습니다.

use serde::{Deserialize, Serialize};

use crate::domain::entities::users::{Role, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub enabled: bool,
    pub not_locked: bool,
    pub using_mfa: bool,
    pub created_at: String,
    pub role_name: String,
    pub permissions: String,
}

impl UserDto {
    /// 역할을 찾지 못한 경우 권한 문자열은 비어 있습니다.
    pub fn from_user(user: User, role: Option<&Role>) -> Self {
        let created_at = user.created_at.try_to_rfc3339_string().unwrap_or_default();
        let permissions = role.map(|role| role.permission.clone()).unwrap_or_default();

        Self {
            id: user.id_string().unwrap_or_default(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            address: user.address,
            phone: user.phone,
            title: user.title,
            bio: user.bio,
            image_url: user.image_url,
            enabled: user.enabled,
            not_locked: user.not_locked,
            using_mfa: user.using_mfa,
            created_at,
            role_name: user.role_name,
            permissions,
        }
    }
}
