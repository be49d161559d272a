//! 회원 가입 요청 DTO
//!
//! 필수 필드는 공백만으로 채울 수 없고, 선택 필드는 공백이면 `None`으로 정리됩니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::utils::string_utils::{deserialize_email, deserialize_optional_string};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(custom(function = "validate_first_name"))]
    pub first_name: String,

    #[validate(custom(function = "validate_last_name"))]
    pub last_name: String,

    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Invalid email. Please enter a valid email"))]
    pub email: String,

    #[validate(custom(function = "validate_password"))]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub bio: Option<String>,
}

fn not_blank(value: &str, code: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(code).with_message(message.into()));
    }
    Ok(())
}

fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "first_name_blank", "First name cannot be empty")
}

fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "last_name_blank", "Last name cannot be empty")
}

fn validate_password(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "password_blank", "Password cannot be empty")
}
