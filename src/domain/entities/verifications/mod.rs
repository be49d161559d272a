//! 일회용 검증 레코드
//!
//! 계정 인증 링크, 비밀번호 재설정 링크, MFA 코드는 모두 같은 모양의 레코드로
//! 저장됩니다. 원본 키/코드는 저장하지 않고 SHA-256 다이제스트를 저장소 키로 씁니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationKind {
    /// 가입 후 이메일 인증 링크
    Account,
    /// 비밀번호 재설정 링크
    Password,
    /// 로그인 2단계 코드
    MfaCode,
}

impl VerificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationKind::Account => "account",
            VerificationKind::Password => "password",
            VerificationKind::MfaCode => "mfa",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub kind: VerificationKind,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    pub fn new(kind: VerificationKind, email: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            email: email.to_string(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// 저장소 키로 쓰는 SHA-256 hex 다이제스트
pub fn key_digest(raw: &str) -> String {
    format!("{:x}", Sha256::digest(raw.as_bytes()))
}

/// MFA 코드는 사용자별로 범위를 좁혀 다이제스트합니다. 이메일과 코드는 대소문자를 구분하지 않습니다.
pub fn code_digest(email: &str, code: &str) -> String {
    key_digest(&format!("{}:{}", email.trim().to_lowercase(), code.trim().to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let record = VerificationRecord::new(VerificationKind::Password, "a@b.c", now + Duration::seconds(1));

        assert!(!record.is_expired(now));
        assert!(record.is_expired(now + Duration::seconds(1)));
    }

    #[test]
    fn test_code_digest_ignores_case() {
        assert_eq!(code_digest("Ana@Example.com", "abcdefgh"), code_digest("ana@example.com", "ABCDEFGH"));
        assert_ne!(code_digest("ana@example.com", "ABCDEFGH"), code_digest("bob@example.com", "ABCDEFGH"));
    }

    #[test]
    fn test_key_digest_is_hex_sha256() {
        let digest = key_digest("some-key");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(digest, "some-key");
    }
}
