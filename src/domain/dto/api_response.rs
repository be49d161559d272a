//! 공통 JSON 응답 봉투
//!
//! 성공/실패와 관계없이 모든 엔드포인트가 같은 모양으로 응답합니다.
//!
//! ```json
//! {
//!   "timeStamp": "2024-05-01T10:00:00+00:00",
//!   "statusCode": 200,
//!   "status": "OK",
//!   "message": "Login Success",
//!   "data": { "user": { ... }, "access_token": "...", "refresh_token": "..." }
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub time_stamp: String,
    pub status_code: u16,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl ApiResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            time_stamp: Utc::now().to_rfc3339(),
            status_code: status.as_u16(),
            status: status_name(status),
            reason: None,
            message: None,
            data: None,
        }
    }

    pub fn ok(message: &str) -> Self {
        Self::new(StatusCode::OK).message(message)
    }

    pub fn error(status: StatusCode, reason: impl Into<String>) -> Self {
        let mut response = Self::new(status);
        response.reason = Some(reason.into());
        response
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// `data` 맵에 항목을 추가합니다.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.data.get_or_insert_with(Map::new).insert(key.to_string(), value);
        self
    }

    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        HttpResponse::build(status).json(self)
    }
}

/// `StatusCode::BAD_REQUEST` → `"BAD_REQUEST"`
pub fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(|reason| reason.to_uppercase().replace([' ', '-'], "_"))
        .unwrap_or_else(|| status.as_u16().to_string())
}
