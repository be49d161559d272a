//! # User HTTP Handlers
//!
//! `/user` 아래의 가입, 로그인, 계정 인증, 비밀번호 재설정, 토큰 갱신 엔드포인트입니다.
//! 모든 응답은 [`ApiResponse`] 봉투를 사용하고, 실패는 `AppError`가 같은 봉투로 변환합니다.
//!
//! | 메서드 | 경로 | 성공 message |
//! |--------|------|--------------|
//! | `POST` | `/user/register` | `User created` (201) |
//! | `POST` | `/user/login` | `Login Success` 또는 `Verification code sent` |
//! | `GET` | `/user/verify/code/{email}/{code}` | `Login Success` |
//! | `GET` | `/user/profile` | `Profile Retrieved` (`READ:USER` 필요) |
//! | `GET` | `/user/resetpassword/{email}` | `Email sent. ...` |
//! | `GET` | `/user/verify/password/{key}` | `Please enter a new password` |
//! | `POST` | `/user/resetpassword/{key}/{password}/{confirmPassword}` | `Password reset successfully` |
//! | `GET` | `/user/verify/account/{key}` | `Account verified` / `Account already verified` |
//! | `GET` | `/user/refresh/token` | `Token refreshed` |
//!
//! 로그인 성공 응답 예:
//!
//! ```json
//! {
//!   "timeStamp": "2024-05-01T10:00:00+00:00",
//!   "statusCode": 200,
//!   "status": "OK",
//!   "message": "Login Success",
//!   "data": { "user": { "email": "ana@example.com", ... }, "access_token": "...", "refresh_token": "..." }
//! }
//! ```

use actix_web::http::{header, StatusCode};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::users::{CreateUserRequest, LoginRequest};
use crate::domain::dto::ApiResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::{AuthenticationService, LoginOutcome, REFRESH_TOKEN_INVALID_MESSAGE};
use crate::services::users::UserService;

/// 회원 가입
///
/// 계정은 비활성 상태로 만들어지고 인증 링크가 메일로 발송됩니다.
#[post("/register")]
pub async fn register(
    user_service: web::Data<UserService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = user_service.create_user(payload.into_inner()).await?;

    let response = ApiResponse::new(StatusCode::CREATED)
        .message("User created")
        .with("user", &user);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/user/get/{}", user.id)))
        .json(response))
}

/// 이메일/비밀번호 로그인
///
/// MFA 사용자는 토큰 대신 코드 메일을 받습니다.
#[post("/login")]
pub async fn login(
    auth_service: web::Data<AuthenticationService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let outcome = auth_service.login(&payload.email, &payload.password).await?;
    Ok(login_response(outcome, "Login Success"))
}

#[derive(Debug, Deserialize)]
pub struct CodePath {
    pub email: String,
    pub code: String,
}

#[get("/verify/code/{email}/{code}")]
pub async fn verify_code(
    auth_service: web::Data<AuthenticationService>,
    path: web::Path<CodePath>,
) -> Result<HttpResponse, AppError> {
    let outcome = auth_service.verify_code(&path.email, &path.code).await?;
    Ok(login_response(outcome, "Login Success"))
}

#[get("/profile", wrap = "AuthMiddleware::required_with_authority(\"READ:USER\")")]
pub async fn profile(
    user_service: web::Data<UserService>,
    auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = user_service.get_user_by_email(&auth_user.email).await?;

    Ok(ApiResponse::ok("Profile Retrieved").with("user", user).into_response())
}

#[get("/resetpassword/{email}")]
pub async fn reset_password(
    user_service: web::Data<UserService>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user_service.reset_password(&email).await?;

    Ok(ApiResponse::ok("Email sent. Please check your email to reset your password.").into_response())
}

#[get("/verify/password/{key}")]
pub async fn verify_password_key(
    user_service: web::Data<UserService>,
    key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = user_service.verify_password_key(&key).await?;

    Ok(ApiResponse::ok("Please enter a new password").with("user", user).into_response())
}

#[derive(Debug, Deserialize)]
pub struct RenewPasswordPath {
    pub key: String,
    pub password: String,
    pub confirm_password: String,
}

#[post("/resetpassword/{key}/{password}/{confirm_password}")]
pub async fn renew_password(
    user_service: web::Data<UserService>,
    path: web::Path<RenewPasswordPath>,
) -> Result<HttpResponse, AppError> {
    user_service
        .renew_password(&path.key, &path.password, &path.confirm_password)
        .await?;

    Ok(ApiResponse::ok("Password reset successfully").into_response())
}

#[get("/verify/account/{key}")]
pub async fn verify_account(
    user_service: web::Data<UserService>,
    key: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let already_verified = user_service.verify_account_key(&key).await?;

    let message = if already_verified {
        "Account already verified"
    } else {
        "Account verified"
    };
    Ok(ApiResponse::ok(message).into_response())
}

/// `Authorization: Bearer {refresh_token}`으로 새 액세스 토큰을 발급합니다.
#[get("/refresh/token")]
pub async fn refresh(
    auth_service: web::Data<AuthenticationService>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::ApiError(REFRESH_TOKEN_INVALID_MESSAGE.to_string()))?;

    let outcome = auth_service.refresh(token).await?;
    Ok(login_response(outcome, "Token refreshed"))
}

/// `/user/error` 및 매칭되지 않는 모든 경로
pub async fn handle_error(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!("An error occurred {}", req.method())))
}

fn login_response(outcome: LoginOutcome, success_message: &str) -> HttpResponse {
    match outcome {
        LoginOutcome::Authenticated {
            user,
            access_token,
            refresh_token,
        } => ApiResponse::ok(success_message)
            .with("user", user)
            .with("access_token", access_token)
            .with("refresh_token", refresh_token)
            .into_response(),
        LoginOutcome::VerificationRequired { user } => ApiResponse::ok("Verification code sent")
            .with("user", user)
            .into_response(),
    }
}
