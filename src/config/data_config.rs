//! 데이터 저장소 및 서버 설정 관리 모듈
//!
//! 실행 환경, 저장소 백엔드(MongoDB/Redis 또는 인메모리), HTTP 서버 바인딩,
//! 요청 제한과 CORS 설정을 환경 변수에서 읽어옵니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 자동화 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우
    /// 가장 보수적인 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .map(|value| Self::from_str(&value))
            .unwrap_or(Environment::Production)
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위의 정수이면 그 값을, 아니면 환경별 기본값을 사용합니다.
    ///
    /// # Environment Defaults
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10
    /// - Production: 12
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development | Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버 포트. 기본값: 8080
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080)
    }

    /// 바인딩 호스트. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 워커 스레드 수. 기본값: 4
    pub fn workers() -> usize {
        env::var("SERVER_WORKERS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|workers: &usize| *workers > 0)
            .unwrap_or(4)
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 사용자/역할 및 검증 키 저장소 종류
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageBackend {
    /// MongoDB(사용자, 역할) + Redis(검증 키)
    Mongo,
    /// 프로세스 메모리. 로컬 실행과 테스트용
    Memory,
}

impl StorageBackend {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StorageBackend::Memory,
            _ => StorageBackend::Mongo,
        }
    }
}

/// 저장소 연결 설정
pub struct StorageConfig;

impl StorageConfig {
    /// `STORAGE_BACKEND` (mongo | memory). 기본값: mongo
    pub fn backend() -> StorageBackend {
        env::var("STORAGE_BACKEND")
            .map(|value| StorageBackend::from_str(&value))
            .unwrap_or(StorageBackend::Mongo)
    }

    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "invoice_manager_dev".to_string())
    }

    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}

/// 요청 빈도 제한 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND`(기본 100), `RATE_LIMIT_BURST_SIZE`(기본 200)
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(100);

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(200);

        Self { per_second, burst_size }
    }
}

/// CORS 허용 Origin 설정
pub struct CorsConfig;

impl CorsConfig {
    /// 쉼표로 구분된 `CORS_ALLOWED_ORIGINS`. 기본값은 로컬 프론트엔드 주소들입니다.
    pub fn allowed_origins() -> Vec<String> {
        let raw = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:4200".to_string());
        Self::parse_origins(&raw)
    }

    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str(" testing "), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_env() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_bcrypt_cost_is_in_range() {
        let cost = PasswordConfig::bcrypt_cost();
        assert!((4..=15).contains(&cost));
    }

    #[test]
    fn test_storage_backend_from_string() {
        assert_eq!(StorageBackend::from_str("memory"), StorageBackend::Memory);
        assert_eq!(StorageBackend::from_str("In-Memory"), StorageBackend::Memory);
        assert_eq!(StorageBackend::from_str("mongo"), StorageBackend::Mongo);
        assert_eq!(StorageBackend::from_str(""), StorageBackend::Mongo);
    }

    #[test]
    fn test_parse_cors_origins() {
        let origins = CorsConfig::parse_origins(" http://a.test , ,http://b.test");
        assert_eq!(origins, vec!["http://a.test".to_string(), "http://b.test".to_string()]);
    }

    #[test]
    fn test_server_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }
        if env::var("SERVER_WORKERS").is_err() {
            assert_eq!(ServerConfig::workers(), 4);
        }
    }
}
