//! 로그인 요청 DTO

use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_email;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Invalid email. Please enter a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_login_request_email_is_normalized_before_validation() {
        let parsed: LoginRequest =
            serde_json::from_str(r#"{"email": " Ana@Example.com  ", "password": "secret"}"#).unwrap();
        assert_eq!(parsed.email, "ana@example.com");
        assert!(parsed.validate().is_ok());
    }
}
