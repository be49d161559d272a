//! 메일 발송
//!
//! 서비스는 [`MailSender`] trait에만 의존합니다.
//!
//! | 구현 | `MAIL_PROVIDER` | 용도 |
//! |------|-----------------|------|
//! | [`LogMailSender`] | `log` (기본) | 로컬 개발. 본문을 로그로 출력 |
//! | [`HttpMailSender`] | `http` | 메일 릴레이 API에 JSON POST |
//! | [`MemoryMailSender`] | - | 테스트용 outbox |

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::{MailConfig, MailProvider};
use crate::core::errors::{AppError, AppResult};

/// 발송할 메일 종류와 본문에 들어갈 값
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum MailTemplate {
    AccountVerification { first_name: String, url: String },
    PasswordReset { first_name: String, url: String },
    VerificationCode {
        first_name: String,
        code: String,
        expires_in_hours: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(flatten)]
    pub template: MailTemplate,
}

impl MailMessage {
    pub fn new(to: &str, template: MailTemplate) -> Self {
        let (subject, body) = match &template {
            MailTemplate::AccountVerification { first_name, url } => (
                "Invoice Manager - Account Verification",
                format!(
                    "Hello {},\n\nYour new account has been created. Please click the link below to verify your account.\n\n{}\n\nThe Support Team",
                    first_name, url
                ),
            ),
            MailTemplate::PasswordReset { first_name, url } => (
                "Invoice Manager - Reset Password Request",
                format!(
                    "Hello {},\n\nPlease click the link below to reset your password.\n\n{}\n\nThe Support Team",
                    first_name, url
                ),
            ),
            MailTemplate::VerificationCode {
                first_name,
                code,
                expires_in_hours,
            } => (
                "Invoice Manager - Verification Code",
                format!(
                    "Hello {},\n\nYour verification code is {}. It expires in {} hours.\n\nThe Support Team",
                    first_name, code, expires_in_hours
                ),
            ),
        };

        Self {
            to: to.to_string(),
            subject: subject.to_string(),
            body,
            template,
        }
    }

    /// 코드와 링크를 뺀 로그용 요약
    pub fn summary(&self) -> String {
        format!("to={} subject={}", self.to, self.subject)
    }
}

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}

/// 설정된 제공자로 발송기를 만듭니다.
pub fn mail_sender_from_env() -> AppResult<Arc<dyn MailSender>> {
    match MailConfig::provider() {
        MailProvider::Log => Ok(Arc::new(LogMailSender)),
        MailProvider::Http => {
            let api_url = MailConfig::api_url().ok_or_else(|| {
                AppError::InternalError("MAIL_PROVIDER=http 에는 MAIL_API_URL이 필요합니다".to_string())
            })?;
            Ok(Arc::new(HttpMailSender::new(api_url, MailConfig::api_key(), MailConfig::from_address())))
        }
    }
}

pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        info!("📧 메일 발송 (log) {}", message.summary());
        debug!("📧 메일 본문:\n{}", message.body);
        Ok(())
    }
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

pub struct HttpMailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailSender {
    pub fn new(api_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        let payload = RelayPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.body,
        };

        let mut request = self.client.post(&self.api_url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 릴레이 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("⚠️ 메일 릴레이 응답 {}: {}", status, error_text);
            return Err(AppError::ExternalServiceError(format!(
                "메일 발송 실패 ({}): {}",
                status, error_text
            )));
        }

        info!("📧 메일 발송 완료 {}", message.summary());
        Ok(())
    }
}

/// 보낸 메일을 모아 두는 테스트용 발송기
#[derive(Default)]
pub struct MemoryMailSender {
    outbox: Mutex<Vec<MailMessage>>,
}

impl MemoryMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<MailMessage> {
        self.outbox.lock().await.clone()
    }

    pub async fn last_to(&self, email: &str) -> Option<MailMessage> {
        self.outbox.lock().await.iter().rev().find(|m| m.to == email).cloned()
    }
}

#[async_trait]
impl MailSender for MemoryMailSender {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        self.outbox.lock().await.push(message);
        Ok(())
    }
}
