//! `/user` API 통합 테스트
//!
//! 메모리 저장소와 메모리 outbox로 전체 `App`을 구성해 요청 흐름을 검증합니다.

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use chrono::Duration;
use serde_json::{json, Value};

use invoice_manager_backend::domain::entities::users::{Role, User};
use invoice_manager_backend::domain::models::auth::UserPrincipal;
use invoice_manager_backend::repositories::roles::InMemoryRoleRepository;
use invoice_manager_backend::repositories::users::{InMemoryUserRepository, UserRepository};
use invoice_manager_backend::repositories::verifications::InMemoryVerificationRepository;
use invoice_manager_backend::routes::configure_all_routes;
use invoice_manager_backend::services::auth::{AuthenticationService, TokenService, TokenSettings};
use invoice_manager_backend::services::mail::{MailTemplate, MemoryMailSender};
use invoice_manager_backend::services::users::{UserService, UserSettings};

struct TestContext {
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
    auth_service: web::Data<AuthenticationService>,
    users: Arc<InMemoryUserRepository>,
    mail: Arc<MemoryMailSender>,
}

fn context() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let mail = Arc::new(MemoryMailSender::new());

    let user_service = Arc::new(UserService::new(
        users.clone(),
        Arc::new(InMemoryRoleRepository::with_default_roles()),
        Arc::new(InMemoryVerificationRepository::new()),
        mail.clone(),
        UserSettings {
            bcrypt_cost: 4,
            frontend_base_url: "http://localhost:4200".to_string(),
            code_length: 8,
            code_ttl: Duration::hours(24),
            password_reset_ttl: Duration::hours(24),
            account_verification_ttl: Duration::days(30),
        },
    ));
    let token_service = Arc::new(TokenService::new(TokenSettings::with_secret("integration-test-secret")));
    let auth_service = Arc::new(AuthenticationService::new(user_service.clone(), token_service.clone()));

    TestContext {
        user_service: web::Data::from(user_service),
        token_service: web::Data::from(token_service),
        auth_service: web::Data::from(auth_service),
        users,
        mail,
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.user_service.clone())
                .app_data($ctx.token_service.clone())
                .app_data($ctx.auth_service.clone())
                .configure(configure_all_routes),
        )
        .await
    };
}

async fn insert_user(ctx: &TestContext, email: &str, using_mfa: bool) {
    let mut user = User::new_registered(
        "Ana".to_string(),
        "Petrovic".to_string(),
        email.to_string(),
        bcrypt::hash("secret123", 4).unwrap(),
    );
    user.enabled = true;
    user.using_mfa = using_mfa;
    ctx.users.insert(user).await.unwrap();
}

async fn last_link_key(ctx: &TestContext, email: &str) -> String {
    match ctx.mail.last_to(email).await.expect("no mail sent").template {
        MailTemplate::AccountVerification { url, .. } | MailTemplate::PasswordReset { url, .. } => {
            url.rsplit('/').next().unwrap().to_string()
        }
        other => panic!("Expected a link mail, got {:?}", other),
    }
}

fn registration() -> Value {
    json!({
        "firstName": "Ana",
        "lastName": "Petrovic",
        "email": "ana@example.com",
        "password": "secret123",
        "title": "Accountant"
    })
}

fn login_body(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

#[actix_web::test]
async fn test_register_then_verify_account_then_login() {
    let ctx = context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post().uri("/user/register").set_json(registration()).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "User created");
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["data"]["user"]["enabled"], false);
    assert_eq!(body["data"]["user"]["title"], "Accountant");
    assert!(body["data"]["user"].get("passwordHash").is_none());
    assert_eq!(location, format!("/user/get/{}", body["data"]["user"]["id"].as_str().unwrap()));

    // 인증 전 로그인은 거부
    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(login_body("ana@example.com", "secret123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "User is disabled");

    let key = last_link_key(&ctx, "ana@example.com").await;
    let req = test::TestRequest::get().uri(&format!("/user/verify/account/{}", key)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Account verified");

    let req = test::TestRequest::get().uri(&format!("/user/verify/account/{}", key)).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "This link is not valid.");

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(login_body("ana@example.com", "secret123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Login Success");
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());
}

#[actix_web::test]
async fn test_duplicate_registration_is_rejected() {
    let ctx = context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post().uri("/user/register").set_json(registration()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/user/register").set_json(registration()).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "Email already in use. Please use a different email and try again");
    assert_eq!(body["status"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_bad_credentials() {
    let ctx = context();
    insert_user(&ctx, "ana@example.com", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(login_body("ana@example.com", "wrong-password"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "Bad credentials");
}

#[actix_web::test]
async fn test_profile_requires_access_token() {
    let ctx = context();
    insert_user(&ctx, "ana@example.com", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/user/profile").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "You need to log in to access this resource");

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(login_body("ana@example.com", "secret123"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/user/profile")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", access_token)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Profile Retrieved");
    assert_eq!(body["data"]["user"]["email"], "ana@example.com");
    assert_eq!(body["data"]["user"]["roleName"], "ROLE_USER");
}

#[actix_web::test]
async fn test_mfa_login_requires_emailed_code() {
    let ctx = context();
    insert_user(&ctx, "ana@example.com", true).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(login_body("ana@example.com", "secret123"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Verification code sent");
    assert!(body["data"].get("access_token").is_none());
    assert_eq!(body["data"]["user"]["usingMfa"], true);

    let code = match ctx.mail.last_to("ana@example.com").await.unwrap().template {
        MailTemplate::VerificationCode { code, .. } => code,
        other => panic!("Expected code mail, got {:?}", other),
    };

    let req = test::TestRequest::get()
        .uri(&format!("/user/verify/code/ana@example.com/{}", code))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Login Success");
    assert!(body["data"]["access_token"].is_string());

    let req = test::TestRequest::get()
        .uri(&format!("/user/verify/code/ana@example.com/{}", code))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "Code is invalid. Please try again.");
}

#[actix_web::test]
async fn test_password_reset_flow() {
    let ctx = context();
    insert_user(&ctx, "ana@example.com", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/user/resetpassword/ana@example.com").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Email sent. Please check your email to reset your password.");

    let key = last_link_key(&ctx, "ana@example.com").await;

    let req = test::TestRequest::get().uri(&format!("/user/verify/password/{}", key)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Please enter a new password");
    assert_eq!(body["data"]["user"]["email"], "ana@example.com");

    let req = test::TestRequest::post()
        .uri(&format!("/user/resetpassword/{}/newSecret1/different", key))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "Passwords don't match. Please try again.");

    let req = test::TestRequest::post()
        .uri(&format!("/user/resetpassword/{}/newSecret1/newSecret1", key))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Password reset successfully");

    let req = test::TestRequest::post()
        .uri(&format!("/user/resetpassword/{}/again123/again123", key))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "This link is not valid. Please reset your password again.");

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(login_body("ana@example.com", "newSecret1"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_reset_password_for_unknown_email() {
    let ctx = context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/user/resetpassword/nobody@example.com").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "No user found by email: nobody@example.com");
}

#[actix_web::test]
async fn test_refresh_token_endpoint() {
    let ctx = context();
    insert_user(&ctx, "ana@example.com", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(login_body("ana@example.com", "secret123"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();
    let refresh_token = body["data"]["refresh_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/user/refresh/token")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", refresh_token)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Token refreshed");
    assert_eq!(body["data"]["refresh_token"], refresh_token.as_str());
    assert!(body["data"]["access_token"].is_string());

    for authorization in [Some(format!("Bearer {}", access_token)), None] {
        let mut req = test::TestRequest::get().uri("/user/refresh/token");
        if let Some(value) = authorization {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["reason"], "Refresh Token missing or invalid");
    }
}

#[actix_web::test]
async fn test_error_route_and_unknown_paths() {
    let ctx = context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/user/error").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "An error occurred GET");

    let req = test::TestRequest::post().uri("/does/not/exist").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["reason"], "An error occurred POST");
    assert_eq!(body["status"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_malformed_json_uses_error_envelope() {
    let ctx = context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/user/login")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["statusCode"], 400);
    assert!(body["reason"].is_string());
}

#[actix_web::test]
async fn test_health_and_jwks_under_hs512() {
    let ctx = context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/.well-known/jwks.json").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_padded_mixed_case_email_registers_and_logs_in() {
    let ctx = context();
    let app = init_app!(ctx);

    let mut body = registration();
    body["email"] = json!("  Ana@Example.COM ");
    let req = test::TestRequest::post().uri("/user/register").set_json(body).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["user"]["email"], "ana@example.com");

    let key = last_link_key(&ctx, "ana@example.com").await;
    let req = test::TestRequest::get().uri(&format!("/user/verify/account/{}", key)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/user/login")
        .set_json(login_body(" ANA@example.com  ", "secret123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["user"]["email"], "ana@example.com");
}

#[actix_web::test]
async fn test_expired_or_foreign_refresh_token_is_rejected() {
    let ctx = context();
    insert_user(&ctx, "ana@example.com", false).await;
    let app = init_app!(ctx);

    let mut user = User::new_registered(
        "Ana".to_string(),
        "Petrovic".to_string(),
        "ana@example.com".to_string(),
        "hash".to_string(),
    );
    user.enabled = true;
    let principal = UserPrincipal::new(user, Role::new("ROLE_USER", "READ:USER"));

    let mut expired_settings = TokenSettings::with_secret("integration-test-secret");
    expired_settings.refresh_token_ttl = Duration::minutes(-10);
    let expired = TokenService::new(expired_settings).create_refresh_token(&principal).unwrap();
    let foreign = TokenService::new(TokenSettings::with_secret("another-service-secret"))
        .create_refresh_token(&principal)
        .unwrap();

    for token in [expired, foreign] {
        let req = test::TestRequest::get()
            .uri("/user/refresh/token")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["reason"], "Refresh Token missing or invalid");
    }
}
