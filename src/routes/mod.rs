//! # Route Configuration
//!
//! 모든 HTTP 라우트를 한곳에서 구성합니다. 서비스(`web::Data`)는 호출하는 쪽
//! (`main`, 통합 테스트)이 `App`에 등록합니다.
//!
//! ```text
//! GET  /health
//! GET  /.well-known/jwks.json
//! ANY  /user/**          (handlers::users)
//! ANY  그 외             404 "An error occurred {METHOD}"
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::core::errors::AppError;
use crate::handlers;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());

    cfg.service(health_check);
    cfg.service(handlers::rsa::jwks_handler);

    configure_user_routes(cfg);

    cfg.default_service(web::route().to(handlers::users::handle_error));
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(handlers::users::register)
            .service(handlers::users::login)
            .service(handlers::users::verify_code)
            .service(handlers::users::profile)
            .service(handlers::users::reset_password)
            .service(handlers::users::verify_password_key)
            .service(handlers::users::renew_password)
            .service(handlers::users::verify_account)
            .service(handlers::users::refresh)
            .route("/error", web::route().to(handlers::users::handle_error)),
    );
}

/// 잘못된 JSON 본문도 공통 에러 봉투(400)로 응답합니다.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "invoice_manager_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
