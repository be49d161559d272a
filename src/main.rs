//! 인보이스 매니저 인증 서비스 메인 애플리케이션
//!
//! 저장소와 서비스를 초기화해 `ServiceLocator`에 등록한 뒤 Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use invoice_manager_backend::caching::redis::RedisClient;
use invoice_manager_backend::config::{CorsConfig, RateLimitConfig, ServerConfig, StorageBackend, StorageConfig};
use invoice_manager_backend::core::errors::AppResult;
use invoice_manager_backend::core::registry::ServiceLocator;
use invoice_manager_backend::db::Database;
use invoice_manager_backend::repositories::roles::{InMemoryRoleRepository, MongoRoleRepository, RoleRepository};
use invoice_manager_backend::repositories::users::{InMemoryUserRepository, MongoUserRepository, UserRepository};
use invoice_manager_backend::repositories::verifications::{
    InMemoryVerificationRepository, RedisVerificationRepository, VerificationRepository,
};
use invoice_manager_backend::routes::configure_all_routes;
use invoice_manager_backend::services::auth::{AuthenticationService, TokenService};
use invoice_manager_backend::services::mail::mail_sender_from_env;
use invoice_manager_backend::services::users::{UserService, UserSettings};

/// 서비스가 의존하는 저장소 묶음
struct Stores {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    verifications: Arc<dyn VerificationRepository>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 인보이스 매니저 인증 서비스 시작중...");

    if let Err(e) = bootstrap().await {
        error!("❌ 서비스 초기화 실패: {}", e);
        return Err(std::io::Error::other(e.to_string()));
    }

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// 저장소와 서비스를 만들고 `ServiceLocator`에 등록합니다.
async fn bootstrap() -> AppResult<()> {
    let stores = initialize_stores().await?;

    let user_service = Arc::new(UserService::new(
        stores.users,
        stores.roles,
        stores.verifications,
        mail_sender_from_env()?,
        UserSettings::from_env(),
    ));
    let token_service = Arc::new(TokenService::from_env()?);
    let auth_service = Arc::new(AuthenticationService::new(user_service.clone(), token_service.clone()));

    ServiceLocator::set(user_service);
    ServiceLocator::set(token_service);
    ServiceLocator::set(auth_service);

    let initialized = ServiceLocator::initialize_all().await?;
    info!("🗂️ 리포지토리 {}개 초기화 완료", initialized);

    Ok(())
}

/// `STORAGE_BACKEND`에 따라 MongoDB/Redis 또는 메모리 저장소를 준비합니다.
async fn initialize_stores() -> AppResult<Stores> {
    match StorageConfig::backend() {
        StorageBackend::Memory => {
            info!("🧪 메모리 저장소 사용 (STORAGE_BACKEND=memory)");
            Ok(Stores {
                users: Arc::new(InMemoryUserRepository::new()),
                roles: Arc::new(InMemoryRoleRepository::with_default_roles()),
                verifications: Arc::new(InMemoryVerificationRepository::new()),
            })
        }
        StorageBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");

            let database = Arc::new(Database::new().await?);
            let redis_client = Arc::new(RedisClient::new().await?);

            let users = Arc::new(MongoUserRepository::new(database.clone()));
            let roles = Arc::new(MongoRoleRepository::new(database.clone()));
            ServiceLocator::register_repository(users.clone());
            ServiceLocator::register_repository(roles.clone());

            Ok(Stores {
                users,
                roles,
                verifications: Arc::new(RedisVerificationRepository::new(redis_client)),
            })
        }
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 요청 제한, CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    let user_service = web::Data::from(locate::<UserService>()?);
    let token_service = web::Data::from(locate::<TokenService>()?);
    let auth_service = web::Data::from(locate::<AuthenticationService>()?);

    let rate_limit = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second, rate_limit.burst_size
    );
    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(user_service.clone())
            .app_data(token_service.clone())
            .app_data(auth_service.clone())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

fn locate<T: 'static + Send + Sync>() -> std::io::Result<Arc<T>> {
    ServiceLocator::get::<T>().map_err(|e| std::io::Error::other(e.to_string()))
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    // 로거 초기화 전이므로 결과는 stderr로 남깁니다.
    match loaded {
        Ok(file) => eprintln!("Current profile: {} ({} 로드 됨)", profile, file),
        Err(e) => eprintln!("Current profile: {} (환경 파일 로드 실패: {})", profile, e),
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// `CORS_ALLOWED_ORIGINS`의 Origin들을 허용합니다.
fn configure_cors() -> Cors {
    CorsConfig::allowed_origins()
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ])
        .expose_headers(vec![header::LOCATION])
        .supports_credentials()
        .max_age(3600)
}
