//! # 문자열 유틸리티
//!
//! 요청 입력 정리에 쓰는 공통 함수들입니다.

use serde::Deserialize;

use crate::core::errors::AppError;

/// 이메일을 저장/조회용 형태(앞뒤 공백 제거, 소문자)로 정리합니다.
///
/// ```rust,ignore
/// assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 필수 문자열 필드를 정리합니다. 비어 있으면 `message`로 `ValidationError`를 돌려줍니다.
pub fn require_non_blank(value: &str, message: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// 선택 문자열 필드 정리. 공백뿐인 값은 `None`이 됩니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `#[serde(deserialize_with = "deserialize_optional_string")]`용 역직렬화 함수
///
/// - `"  Ana  "` → `Some("Ana")`
/// - `""`, `"   "`, `null` → `None`
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// `#[serde(deserialize_with = "deserialize_email")]`용. 검증 전에 [`normalize_email`]을 적용합니다.
pub fn deserialize_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_email(&raw))
}
