//! # Redis 클라이언트
//!
//! 검증 키 저장소가 사용하는 얇은 Redis 래퍼입니다.
//! 값은 JSON으로 직렬화해 저장하며, 여러 키를 함께 바꾸는 작업은 Lua 스크립트로 원자적으로 처리합니다.
//!
//! 멀티플렉싱 연결을 사용하므로 단일 TCP 연결에서 여러 요청을 동시에 처리합니다.

use log::info;
use redis::{AsyncCommands, Client, FromRedisValue, Script};
use serde::de::DeserializeOwned;

use crate::config::StorageConfig;
use crate::core::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 PING으로 가용성을 확인합니다.
    pub async fn new() -> AppResult<Self> {
        Self::connect(&StorageConfig::redis_url()).await
    }

    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = Client::open(redis_url).map_err(cache_error)?;

        let mut conn = client.get_multiplexed_async_connection().await.map_err(cache_error)?;
        redis::cmd("PING").query_async::<()>(&mut conn).await.map_err(cache_error)?;

        info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;
        value.map(|json| deserialize(&json)).transpose()
    }

    /// Lua 스크립트를 실행합니다. 스크립트 전체가 하나의 원자적 단위로 실행됩니다.
    pub async fn run_script<T: FromRedisValue>(&self, script: &Script, keys: &[&str], args: &[&str]) -> AppResult<T> {
        let mut conn = self.connection().await?;
        let mut invocation = script.prepare_invoke();
        for key in keys {
            invocation.key(*key);
        }
        for arg in args {
            invocation.arg(*arg);
        }
        invocation.invoke_async(&mut conn).await.map_err(cache_error)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client.get_multiplexed_async_connection().await.map_err(cache_error)
    }
}

fn deserialize<T: DeserializeOwned>(json: &str) -> AppResult<T> {
    serde_json::from_str(json).map_err(|e| AppError::CacheError(format!("Deserialization failed: {}", e)))
}

fn cache_error(e: redis::RedisError) -> AppError {
    AppError::CacheError(e.to_string())
}
