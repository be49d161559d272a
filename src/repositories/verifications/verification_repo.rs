//! 일회용 검증 레코드 저장소
//!
//! 레코드는 원본 키의 다이제스트로 저장되고, 사용자·종류별로 최신 레코드 하나만 유효합니다.
//! 새 레코드를 저장하면 같은 사용자의 같은 종류 이전 레코드는 삭제됩니다.
//!
//! Redis 키 구조:
//!
//! ```text
//! verification:{kind}:{digest}          → VerificationRecord (JSON)
//! verification:{kind}:owner:{email}     → digest
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use redis::Script;

use crate::caching::redis::RedisClient;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::verifications::{VerificationKind, VerificationRecord};

/// 만료 후에도 "만료됨" 응답을 줄 수 있도록 레코드를 더 보관하는 시간(초)
pub const EXPIRED_RECORD_RETENTION_SECS: i64 = 24 * 60 * 60;

/// 이전 레코드 폐기, 새 레코드 저장, 소유자 포인터 갱신을 한 번에 수행합니다.
///
/// KEYS: 레코드 키, 소유자 키 / ARGV: 다이제스트, 레코드 JSON, 레코드 키 접두사, TTL(초)
static STORE_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r"
        local previous = redis.call('GET', KEYS[2])
        if previous and previous ~= ARGV[1] then
            redis.call('DEL', ARGV[3] .. previous)
        end
        redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[4])
        redis.call('SET', KEYS[2], ARGV[1], 'EX', ARGV[4])
        return 1
        ",
    )
});

/// 레코드를 꺼내 삭제하고, 소유자 포인터가 이 레코드를 가리키면 함께 지웁니다.
///
/// KEYS: 레코드 키 / ARGV: 소유자 키 접두사, 다이제스트
static CONSUME_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r"
        local value = redis.call('GETDEL', KEYS[1])
        if not value then
            return false
        end
        local owner_key = ARGV[1] .. cjson.decode(value)['email']
        if redis.call('GET', owner_key) == ARGV[2] then
            redis.call('DEL', owner_key)
        end
        return value
        ",
    )
});

#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// 레코드를 저장하고 같은 사용자/종류의 이전 레코드를 무효화합니다.
    async fn store(&self, digest: &str, record: VerificationRecord) -> AppResult<()>;

    /// 레코드를 소비하지 않고 조회합니다.
    async fn find(&self, kind: VerificationKind, digest: &str) -> AppResult<Option<VerificationRecord>>;

    /// 레코드를 원자적으로 꺼내고 삭제합니다. 같은 키로 두 번째 호출은 `None`입니다.
    async fn consume(&self, kind: VerificationKind, digest: &str) -> AppResult<Option<VerificationRecord>>;
}

pub struct RedisVerificationRepository {
    redis: Arc<RedisClient>,
}

impl RedisVerificationRepository {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    fn record_prefix(kind: VerificationKind) -> String {
        format!("verification:{}:", kind.as_str())
    }

    fn owner_prefix(kind: VerificationKind) -> String {
        format!("verification:{}:owner:", kind.as_str())
    }

    fn record_key(kind: VerificationKind, digest: &str) -> String {
        format!("{}{}", Self::record_prefix(kind), digest)
    }

    fn owner_key(kind: VerificationKind, email: &str) -> String {
        format!("{}{}", Self::owner_prefix(kind), email)
    }
}

#[async_trait]
impl VerificationRepository for RedisVerificationRepository {
    async fn store(&self, digest: &str, record: VerificationRecord) -> AppResult<()> {
        let record_key = Self::record_key(record.kind, digest);
        let owner_key = Self::owner_key(record.kind, &record.email);
        let json = serde_json::to_string(&record)
            .map_err(|e| AppError::CacheError(format!("Serialization failed: {}", e)))?;

        let ttl_secs = (record.expires_at - Utc::now()).num_seconds().max(0) + EXPIRED_RECORD_RETENTION_SECS;

        self.redis
            .run_script::<i64>(
                &STORE_SCRIPT,
                &[&record_key, &owner_key],
                &[digest, &json, &Self::record_prefix(record.kind), &ttl_secs.to_string()],
            )
            .await?;
        Ok(())
    }

    async fn find(&self, kind: VerificationKind, digest: &str) -> AppResult<Option<VerificationRecord>> {
        self.redis.get(&Self::record_key(kind, digest)).await
    }

    async fn consume(&self, kind: VerificationKind, digest: &str) -> AppResult<Option<VerificationRecord>> {
        let value: Option<String> = self
            .redis
            .run_script(
                &CONSUME_SCRIPT,
                &[&Self::record_key(kind, digest)],
                &[&Self::owner_prefix(kind), digest],
            )
            .await?;

        value
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| AppError::CacheError(format!("Deserialization failed: {}", e)))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(
            RedisVerificationRepository::record_key(VerificationKind::Password, "abc"),
            "verification:password:abc"
        );
        assert_eq!(
            RedisVerificationRepository::owner_key(VerificationKind::MfaCode, "ana@example.com"),
            "verification:mfa:owner:ana@example.com"
        );
    }

    #[actix_web::test]
    #[ignore] // Requires a running Redis (REDIS_URL)
    async fn test_concurrent_issuance_leaves_one_live_record() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let repo = Arc::new(RedisVerificationRepository::new(Arc::new(RedisClient::connect(&url).await.unwrap())));
        let email = format!("{}@example.com", uuid::Uuid::new_v4());
        let expires_at = Utc::now() + chrono::Duration::minutes(5);

        let digests: Vec<String> = (0..8).map(|_| uuid::Uuid::new_v4().to_string()).collect();
        let tasks: Vec<_> = digests
            .iter()
            .cloned()
            .map(|digest| {
                let repo = repo.clone();
                let record = VerificationRecord::new(VerificationKind::Password, &email, expires_at);
                actix_web::rt::spawn(async move { repo.store(&digest, record).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let mut live = 0;
        for digest in &digests {
            if repo.find(VerificationKind::Password, digest).await.unwrap().is_some() {
                live += 1;
                assert!(repo.consume(VerificationKind::Password, digest).await.unwrap().is_some());
                assert!(repo.consume(VerificationKind::Password, digest).await.unwrap().is_none());
            }
        }
        assert_eq!(live, 1);
    }
}
