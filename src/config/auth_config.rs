//! # Authentication Configuration Module
//!
//! JWT 서명, 검증 키 수명, 메일 발송 등 인증 흐름 전반의 설정을 관리합니다.
//!
//! ## 환경 변수
//!
//! ### JWT
//! ```bash
//! export JWT_ALGORITHM="HS512"            # HS512 | RS256
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_ISSUER="invoice-manager"
//! export JWT_AUDIENCE="invoice-manager-clients"
//! export JWT_ACCESS_TOKEN_MINUTES="30"
//! export JWT_REFRESH_TOKEN_DAYS="5"
//! export JWT_PRIVATE_KEY_PATH="./secrets/jwt_private_key.pem"   # RS256 전용
//! export JWT_PUBLIC_KEY_PATH="./secrets/jwt_public_key.pem"     # RS256 전용
//! ```
//!
//! ### 검증 코드 / 링크
//! ```bash
//! export VERIFICATION_CODE_LENGTH="8"
//! export VERIFICATION_CODE_TTL_HOURS="24"
//! export PASSWORD_RESET_TTL_HOURS="24"
//! export ACCOUNT_VERIFICATION_TTL_DAYS="30"
//! ```
//!
//! ### 메일
//! ```bash
//! export MAIL_PROVIDER="http"             # log | http
//! export MAIL_API_URL="https://mail-relay.internal/send"
//! export MAIL_API_KEY="relay-key"
//! export MAIL_FROM="no-reply@invoice-manager.local"
//! export FRONTEND_BASE_URL="http://localhost:4200"
//! ```

use std::env;

use log::warn;

use crate::config::Environment;

const DEV_JWT_SECRET: &str = "invoice-manager-development-secret-change-me";

/// 토큰 서명 알고리즘
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SigningAlgorithm {
    /// HMAC-SHA512, 공유 비밀키
    Hs512,
    /// RSA-SHA256, 키 쌍 + JWKS 공개
    Rs256,
}

impl SigningAlgorithm {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "RS256" => SigningAlgorithm::Rs256,
            _ => SigningAlgorithm::Hs512,
        }
    }
}

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    pub fn algorithm() -> SigningAlgorithm {
        env::var("JWT_ALGORITHM")
            .map(|value| SigningAlgorithm::from_str(&value))
            .unwrap_or(SigningAlgorithm::Hs512)
    }

    /// HMAC 서명 비밀키를 반환합니다.
    ///
    /// # Panics
    ///
    /// 프로덕션 환경에서 `JWT_SECRET`이 설정되지 않은 경우 패닉이 발생합니다.
    /// 그 외 환경에서는 경고 로그와 함께 개발용 키를 사용합니다.
    pub fn secret() -> String {
        match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if Environment::current().is_production() => {
                panic!("JWT_SECRET must be set in production")
            }
            _ => {
                warn!("⚠️ JWT_SECRET 미설정: 개발용 비밀키를 사용합니다");
                DEV_JWT_SECRET.to_string()
            }
        }
    }

    pub fn issuer() -> String {
        env::var("JWT_ISSUER").unwrap_or_else(|_| "invoice-manager".to_string())
    }

    pub fn audience() -> String {
        env::var("JWT_AUDIENCE").unwrap_or_else(|_| "invoice-manager-clients".to_string())
    }

    /// 액세스 토큰 수명(분). 기본값: 30
    pub fn access_token_minutes() -> i64 {
        positive_i64("JWT_ACCESS_TOKEN_MINUTES", 30)
    }

    /// 리프레시 토큰 수명(일). 기본값: 5
    pub fn refresh_token_days() -> i64 {
        positive_i64("JWT_REFRESH_TOKEN_DAYS", 5)
    }

    pub fn private_key_path() -> String {
        env::var("JWT_PRIVATE_KEY_PATH").unwrap_or_else(|_| "./secrets/jwt_private_key.pem".to_string())
    }

    pub fn public_key_path() -> String {
        env::var("JWT_PUBLIC_KEY_PATH").unwrap_or_else(|_| "./secrets/jwt_public_key.pem".to_string())
    }

    pub fn key_id() -> String {
        env::var("JWT_KEY_ID").unwrap_or_else(|_| "invoice-manager-key-1".to_string())
    }
}

/// MFA 코드와 이메일 링크 키의 형식 및 유효 기간 설정
pub struct VerificationConfig;

impl VerificationConfig {
    /// MFA 코드 길이. 기본값: 8 (4-16 범위로 제한)
    pub fn code_length() -> usize {
        env::var("VERIFICATION_CODE_LENGTH")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|len| (4..=16).contains(len))
            .unwrap_or(8)
    }

    /// MFA 코드 유효 시간. 기본값: 24
    pub fn code_ttl_hours() -> i64 {
        positive_i64("VERIFICATION_CODE_TTL_HOURS", 24)
    }

    /// 비밀번호 재설정 링크 유효 시간. 기본값: 24
    pub fn password_reset_ttl_hours() -> i64 {
        positive_i64("PASSWORD_RESET_TTL_HOURS", 24)
    }

    /// 계정 인증 링크 유효 기간(일). 기본값: 30
    pub fn account_verification_ttl_days() -> i64 {
        positive_i64("ACCOUNT_VERIFICATION_TTL_DAYS", 30)
    }
}

/// 메일 발송 방식
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MailProvider {
    /// 로그로만 출력 (개발용)
    Log,
    /// HTTP 메일 릴레이 API
    Http,
}

impl MailProvider {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "http" | "api" => MailProvider::Http,
            _ => MailProvider::Log,
        }
    }
}

/// 메일 설정
pub struct MailConfig;

impl MailConfig {
    pub fn provider() -> MailProvider {
        env::var("MAIL_PROVIDER")
            .map(|value| MailProvider::from_str(&value))
            .unwrap_or(MailProvider::Log)
    }

    pub fn api_url() -> Option<String> {
        env::var("MAIL_API_URL").ok().filter(|url| !url.trim().is_empty())
    }

    pub fn api_key() -> Option<String> {
        env::var("MAIL_API_KEY").ok().filter(|key| !key.trim().is_empty())
    }

    pub fn from_address() -> String {
        env::var("MAIL_FROM").unwrap_or_else(|_| "no-reply@invoice-manager.local".to_string())
    }

    /// 메일 본문 링크에 사용하는 프론트엔드 주소 (끝의 `/` 제거)
    pub fn frontend_base_url() -> String {
        env::var("FRONTEND_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:4200".to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

fn positive_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
