//! 캐시 계층 모듈
//!
//! Redis를 TTL 기반 키-값 저장소로 사용합니다. 검증 링크/코드 레코드가 여기에 저장됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! let record: Option<VerificationRecord> = cache.get("verification:password:abc").await?;
//! let taken: Option<String> = cache.run_script(&script, &["verification:password:abc"], &[]).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
