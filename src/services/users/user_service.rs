//! # 사용자 관리 서비스 구현
//!
//! 가입, 자격 증명 확인, 이메일 인증, 비밀번호 재설정, MFA 코드 발급/확인을 담당합니다.
//!
//! ## 일회용 키의 흐름
//!
//! ```text
//! create_user ──► Account 키 ──► 메일 링크 /user/verify/account/{key}  ──► verify_account_key (소비)
//! reset_password ─► Password 키 ─► 메일 링크 /user/verify/password/{key} ─► verify_password_key (조회)
//!                                                                        └► renew_password (소비)
//! login(MFA) ──► MfaCode ──► 메일 코드 ──► verify_code (소비)
//! ```
//!
//! 원본 키/코드는 메일에만 실리고 저장소에는 다이제스트만 남습니다.
//! 같은 사용자의 같은 종류 키를 새로 만들면 이전 키는 무효가 됩니다.

use std::sync::Arc;

use bcrypt::hash;
use chrono::{Duration, Utc};
use log::{debug, error, info, warn};
use rand::Rng;
use uuid::Uuid;
use validator::Validate;

use crate::config::{MailConfig, PasswordConfig, VerificationConfig};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::{CreateUserRequest, UserDto};
use crate::domain::entities::users::User;
use crate::domain::entities::verifications::{code_digest, key_digest, VerificationKind, VerificationRecord};
use crate::domain::models::auth::UserPrincipal;
use crate::repositories::roles::RoleRepository;
use crate::repositories::users::{UserRepository, EMAIL_IN_USE_MESSAGE};
use crate::repositories::verifications::VerificationRepository;
use crate::services::mail::{MailMessage, MailSender, MailTemplate};
use crate::utils::string_utils::{normalize_email, require_non_blank};

pub const BAD_CREDENTIALS_MESSAGE: &str = "Bad credentials";
pub const ACCOUNT_LOCKED_MESSAGE: &str = "User account is locked";
pub const ACCOUNT_DISABLED_MESSAGE: &str = "User is disabled";
pub const CODE_INVALID_MESSAGE: &str = "Code is invalid. Please try again.";
pub const CODE_EXPIRED_MESSAGE: &str = "This code has expired. Please login again.";
pub const RESET_LINK_INVALID_MESSAGE: &str = "This link is not valid. Please reset your password again.";
pub const RESET_LINK_EXPIRED_MESSAGE: &str = "This link has expired. Please reset your password again.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords don't match. Please try again.";
pub const PASSWORD_EMPTY_MESSAGE: &str = "Password cannot be empty";
pub const ACCOUNT_LINK_INVALID_MESSAGE: &str = "This link is not valid.";

/// 비밀번호 해싱과 검증 키/코드 발급 파라미터
#[derive(Debug, Clone)]
pub struct UserSettings {
    pub bcrypt_cost: u32,
    pub frontend_base_url: String,
    pub code_length: usize,
    pub code_ttl: Duration,
    pub password_reset_ttl: Duration,
    pub account_verification_ttl: Duration,
}

impl UserSettings {
    pub fn from_env() -> Self {
        Self {
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            frontend_base_url: MailConfig::frontend_base_url(),
            code_length: VerificationConfig::code_length(),
            code_ttl: Duration::hours(VerificationConfig::code_ttl_hours()),
            password_reset_ttl: Duration::hours(VerificationConfig::password_reset_ttl_hours()),
            account_verification_ttl: Duration::days(VerificationConfig::account_verification_ttl_days()),
        }
    }
}

/// 사용자 관리 비즈니스 로직 서비스
///
/// 저장소와 메일 발송기는 trait 객체로 주입되므로 운영(MongoDB/Redis)과
/// 테스트(메모리) 구성에서 같은 코드가 동작합니다.
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    role_repo: Arc<dyn RoleRepository>,
    verifications: Arc<dyn VerificationRepository>,
    mail: Arc<dyn MailSender>,
    settings: UserSettings,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        role_repo: Arc<dyn RoleRepository>,
        verifications: Arc<dyn VerificationRepository>,
        mail: Arc<dyn MailSender>,
        settings: UserSettings,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            verifications,
            mail,
            settings,
        }
    }

    /// 새 사용자 계정 생성
    ///
    /// 1. 이메일 정리 후 입력값 검증 (`validator`)
    /// 2. 이메일 중복 확인
    /// 3. bcrypt 해싱 후 비활성 상태로 저장
    /// 4. 계정 인증 링크 발급 및 메일 발송
    ///
    /// 메일 발송 실패는 로그만 남기고 가입은 성공으로 처리합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 필수값 누락, 이메일 형식 오류
    /// * `AppError::ApiError` - 이미 사용 중인 이메일
    pub async fn create_user(&self, mut request: CreateUserRequest) -> AppResult<UserDto> {
        request.email = normalize_email(&request.email);
        request.validate()?;

        let email = request.email.clone();
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::ApiError(EMAIL_IN_USE_MESSAGE.to_string()));
        }

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, self.settings.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        debug!("Password hashing took: {:?}", hash_start.elapsed());

        let mut user = User::new_registered(
            request.first_name.trim().to_string(),
            request.last_name.trim().to_string(),
            email,
            password_hash,
        );
        user.address = request.address;
        user.phone = request.phone;
        user.title = request.title;
        user.bio = request.bio;

        let user = self.user_repo.insert(user).await?;
        info!("👤 새 사용자 가입: {}", user.email);

        let key = Uuid::new_v4().to_string();
        let record = VerificationRecord::new(
            VerificationKind::Account,
            &user.email,
            Utc::now() + self.settings.account_verification_ttl,
        );
        self.verifications.store(&key_digest(&key), record).await?;

        let message = MailMessage::new(
            &user.email,
            MailTemplate::AccountVerification {
                first_name: user.first_name.clone(),
                url: self.verification_url("account", &key),
            },
        );
        if let Err(e) = self.mail.send(message).await {
            error!("❌ 계정 인증 메일 발송 실패 ({}): {}", user.email, e);
        }

        let principal = self.principal_of(user).await?;
        Ok(principal.to_dto())
    }

    /// 이메일과 비밀번호를 확인합니다.
    ///
    /// 비밀번호가 맞은 경우에만 잠김/비활성 상태를 알려 줍니다.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<UserPrincipal> {
        let email = normalize_email(email);

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("🔒 로그인 실패 (존재하지 않는 이메일): {}", email);
                return Err(AppError::BadCredentials(BAD_CREDENTIALS_MESSAGE.to_string()));
            }
        };

        let is_valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !is_valid {
            warn!("🔒 로그인 실패 (비밀번호 불일치): {}", email);
            return Err(AppError::BadCredentials(BAD_CREDENTIALS_MESSAGE.to_string()));
        }

        let principal = self.principal_of(user).await?;
        ensure_can_authenticate(&principal)?;
        Ok(principal)
    }

    /// 사용자와 역할을 함께 읽습니다.
    pub async fn get_principal(&self, email: &str) -> AppResult<UserPrincipal> {
        let user = self.find_user(email).await?;
        self.principal_of(user).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> AppResult<UserDto> {
        Ok(self.get_principal(email).await?.to_dto())
    }

    /// MFA 코드를 발급해 메일로 보냅니다. 이전 코드는 무효가 됩니다.
    pub async fn send_verification_code(&self, user: &UserDto) -> AppResult<()> {
        let code = generate_code(self.settings.code_length);
        let record = VerificationRecord::new(
            VerificationKind::MfaCode,
            &user.email,
            Utc::now() + self.settings.code_ttl,
        );
        self.verifications.store(&code_digest(&user.email, &code), record).await?;

        self.mail
            .send(MailMessage::new(
                &user.email,
                MailTemplate::VerificationCode {
                    first_name: user.first_name.clone(),
                    code,
                    expires_in_hours: self.settings.code_ttl.num_hours(),
                },
            ))
            .await?;

        info!("🔑 MFA 코드 발급: {}", user.email);
        Ok(())
    }

    /// MFA 코드를 소비하고 사용자를 돌려줍니다. 코드와 이메일은 대소문자를 구분하지 않습니다.
    pub async fn verify_code(&self, email: &str, code: &str) -> AppResult<UserPrincipal> {
        let email = normalize_email(email);

        let record = self
            .verifications
            .consume(VerificationKind::MfaCode, &code_digest(&email, code))
            .await?
            .filter(|record| record.email == email)
            .ok_or_else(|| {
                warn!("🔒 잘못된 MFA 코드: {}", email);
                AppError::ApiError(CODE_INVALID_MESSAGE.to_string())
            })?;

        if record.is_expired(Utc::now()) {
            return Err(AppError::ApiError(CODE_EXPIRED_MESSAGE.to_string()));
        }

        let principal = self.get_principal(&email).await?;
        ensure_can_authenticate(&principal)?;
        Ok(principal)
    }

    /// 비밀번호 재설정 링크를 메일로 보냅니다.
    pub async fn reset_password(&self, email: &str) -> AppResult<()> {
        let user = self.find_user(email).await?;

        let key = Uuid::new_v4().to_string();
        let record = VerificationRecord::new(
            VerificationKind::Password,
            &user.email,
            Utc::now() + self.settings.password_reset_ttl,
        );
        self.verifications.store(&key_digest(&key), record).await?;

        self.mail
            .send(MailMessage::new(
                &user.email,
                MailTemplate::PasswordReset {
                    first_name: user.first_name.clone(),
                    url: self.verification_url("password", &key),
                },
            ))
            .await?;

        info!("📨 비밀번호 재설정 링크 발송: {}", user.email);
        Ok(())
    }

    /// 재설정 링크가 유효한지 확인합니다. 키는 소비하지 않습니다.
    pub async fn verify_password_key(&self, key: &str) -> AppResult<UserDto> {
        let record = self
            .verifications
            .find(VerificationKind::Password, &key_digest(key))
            .await?
            .ok_or_else(|| AppError::ApiError(RESET_LINK_INVALID_MESSAGE.to_string()))?;

        if record.is_expired(Utc::now()) {
            return Err(AppError::ApiError(RESET_LINK_EXPIRED_MESSAGE.to_string()));
        }

        self.get_user_by_email(&record.email).await
    }

    /// 재설정 키를 소비하고 새 비밀번호를 저장합니다.
    ///
    /// 입력 오류(불일치, 빈 비밀번호)는 키를 소비하기 전에 거부합니다.
    pub async fn renew_password(&self, key: &str, password: &str, confirm_password: &str) -> AppResult<()> {
        if password != confirm_password {
            return Err(AppError::ApiError(PASSWORD_MISMATCH_MESSAGE.to_string()));
        }
        require_non_blank(password, PASSWORD_EMPTY_MESSAGE)?;

        let record = self
            .verifications
            .consume(VerificationKind::Password, &key_digest(key))
            .await?
            .ok_or_else(|| AppError::ApiError(RESET_LINK_INVALID_MESSAGE.to_string()))?;

        if record.is_expired(Utc::now()) {
            return Err(AppError::ApiError(RESET_LINK_EXPIRED_MESSAGE.to_string()));
        }

        let password_hash = hash(password, self.settings.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        if !self.user_repo.update_password(&record.email, &password_hash).await? {
            return Err(AppError::ApiError(format!("No user found by email: {}", record.email)));
        }

        info!("🔐 비밀번호 변경 완료: {}", record.email);
        Ok(())
    }

    /// 계정 인증 키를 소비하고 계정을 활성화합니다.
    ///
    /// 이미 활성화된 계정이었으면 `true`를 돌려줍니다.
    pub async fn verify_account_key(&self, key: &str) -> AppResult<bool> {
        let record = self
            .verifications
            .consume(VerificationKind::Account, &key_digest(key))
            .await?
            .filter(|record| !record.is_expired(Utc::now()))
            .ok_or_else(|| AppError::ApiError(ACCOUNT_LINK_INVALID_MESSAGE.to_string()))?;

        let user = self.find_user(&record.email).await?;
        if user.enabled {
            return Ok(true);
        }

        self.user_repo.update_enabled(&user.email, true).await?;
        info!("✅ 계정 인증 완료: {}", user.email);
        Ok(false)
    }

    async fn find_user(&self, email: &str) -> AppResult<User> {
        let email = normalize_email(email);
        self.user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::ApiError(format!("No user found by email: {}", email)))
    }

    async fn principal_of(&self, user: User) -> AppResult<UserPrincipal> {
        let role = self
            .role_repo
            .find_by_name(&user.role_name)
            .await?
            .ok_or_else(|| AppError::InternalError(format!("역할을 찾을 수 없습니다: {}", user.role_name)))?;

        Ok(UserPrincipal::new(user, role))
    }

    fn verification_url(&self, kind: &str, key: &str) -> String {
        format!("{}/user/verify/{}/{}", self.settings.frontend_base_url, kind, key)
    }
}

/// 잠김 또는 비활성 계정은 인증할 수 없습니다.
pub fn ensure_can_authenticate(principal: &UserPrincipal) -> AppResult<()> {
    if !principal.is_account_non_locked() {
        warn!("🔒 잠긴 계정 인증 시도: {}", principal.email());
        return Err(AppError::AccountLocked(ACCOUNT_LOCKED_MESSAGE.to_string()));
    }
    if !principal.is_enabled() {
        warn!("🔒 비활성 계정 인증 시도: {}", principal.email());
        return Err(AppError::AccountDisabled(ACCOUNT_DISABLED_MESSAGE.to_string()));
    }
    Ok(())
}

/// 대문자 알파벳으로 이루어진 코드
fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect()
}
