//! # Application Error Handling System
//!
//! 모든 계층의 실패를 하나의 [`AppError`]로 모으고, `actix_web::ResponseError`
//! 구현을 통해 일관된 JSON 응답 봉투([`ApiResponse`])로 변환합니다.
//! Spring의 `@ExceptionHandler` + `HandlerExceptionResolver` 역할을 이 타입 하나가 담당합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | reason |
//! |----------|-------------|--------|
//! | `ApiError`, `BadCredentials`, `AccountDisabled`, `AccountLocked` | 400 | 에러 메시지 |
//! | `TokenExpired`, `InvalidToken`, `ValidationError` | 400 | 에러 메시지 |
//! | `AuthenticationRequired` | 401 | 에러 메시지 |
//! | `AccessDenied` | 403 | 에러 메시지 |
//! | `NotFound` | 404 | 에러 메시지 |
//! | `DatabaseError`, `CacheError`, `ExternalServiceError`, `InternalError` | 500 | 고정 메시지 |
//!
//! 500 계열의 상세 내용은 `error!` 로그로만 남고 클라이언트에는 노출되지 않습니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find(&self, email: &str) -> AppResult<User> {
//!     self.collection()
//!         .find_one(doc! { "email": email })
//!         .await
//!         .map_err(|e| AppError::DatabaseError(e.to_string()))?
//!         .ok_or_else(|| AppError::ApiError(format!("No user found by email: {}", email)))
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use crate::domain::dto::ApiResponse;

/// 500 응답의 고정 reason
pub const GENERIC_ERROR_REASON: &str = "An error occurred. Please try again.";

/// 애플리케이션 전역 에러 타입
///
/// 변형 이름이 곧 HTTP 상태 분류입니다. 클라이언트에 보여줄 메시지를 담는
/// 변형은 `Display`가 메시지 그대로이고, 인프라 계층 변형은 로그용 접두사가 붙습니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 비즈니스 규칙 위반 (중복 이메일, 잘못된 코드, 만료된 링크 등)
    #[error("{0}")]
    ApiError(String),

    /// 이메일 또는 비밀번호 불일치
    #[error("{0}")]
    BadCredentials(String),

    /// 이메일 인증을 마치지 않은 계정
    #[error("{0}")]
    AccountDisabled(String),

    /// 잠긴 계정
    #[error("{0}")]
    AccountLocked(String),

    /// 만료된 JWT
    #[error("{0}")]
    TokenExpired(String),

    /// 서명, 발급자, 대상, 타입 검증에 실패한 JWT
    #[error("{0}")]
    InvalidToken(String),

    /// 입력값 검증 실패
    #[error("{0}")]
    ValidationError(String),

    /// 인증 정보 없음
    #[error("{0}")]
    AuthenticationRequired(String),

    /// 권한 부족
    #[error("{0}")]
    AccessDenied(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에 노출할 reason 문자열
    pub fn reason(&self) -> String {
        match self {
            AppError::DatabaseError(_)
            | AppError::CacheError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => GENERIC_ERROR_REASON.to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ApiError(_)
            | AppError::BadCredentials(_)
            | AppError::AccountDisabled(_)
            | AppError::AccountLocked(_)
            | AppError::TokenExpired(_)
            | AppError::InvalidToken(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationRequired(_) => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::CacheError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("❌ {}", self);
        }

        HttpResponse::build(status).json(ApiResponse::error(status, self.reason()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// 필드 이름 순으로 첫 메시지들을 모아 하나의 `ValidationError`로 만듭니다.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();

        AppError::ValidationError(messages.join(", "))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 `AppError::InternalError`로 변환하는 확장 trait
///
/// ```rust,ignore
/// let pem = fs::read_to_string(path).with_context(|| format!("키 파일 읽기 실패: {}", path))?;
/// ```
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
