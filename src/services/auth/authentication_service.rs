//! 로그인, MFA 코드 확인, 액세스 토큰 갱신
//!
//! [`UserService`]로 사용자를 확인하고 [`TokenService`]로 토큰을 발급하는 얇은 조합 계층입니다.

use std::sync::Arc;

use log::{info, warn};

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::UserDto;
use crate::domain::models::auth::UserPrincipal;
use crate::domain::models::token::TokenType;
use crate::services::auth::token_service::TokenService;
use crate::services::users::{ensure_can_authenticate, UserService};

pub const REFRESH_TOKEN_INVALID_MESSAGE: &str = "Refresh Token missing or invalid";

/// 로그인 결과
#[derive(Debug)]
pub enum LoginOutcome {
    /// MFA 사용자. 코드가 메일로 발송되었고 토큰은 아직 없습니다.
    VerificationRequired { user: UserDto },
    Authenticated {
        user: UserDto,
        access_token: String,
        refresh_token: String,
    },
}

pub struct AuthenticationService {
    user_service: Arc<UserService>,
    token_service: Arc<TokenService>,
}

impl AuthenticationService {
    pub fn new(user_service: Arc<UserService>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_service,
            token_service,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let principal = self.user_service.verify_credentials(email, password).await?;

        if principal.user.using_mfa {
            let user = principal.to_dto();
            self.user_service.send_verification_code(&user).await?;
            return Ok(LoginOutcome::VerificationRequired { user });
        }

        info!("🔓 로그인 성공: {}", principal.email());
        self.authenticated(&principal)
    }

    /// MFA 코드를 확인하고 토큰을 발급합니다.
    pub async fn verify_code(&self, email: &str, code: &str) -> AppResult<LoginOutcome> {
        let principal = self.user_service.verify_code(email, code).await?;

        info!("🔓 MFA 로그인 성공: {}", principal.email());
        self.authenticated(&principal)
    }

    /// 리프레시 토큰으로 새 액세스 토큰을 발급합니다. 리프레시 토큰은 그대로 돌려줍니다.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<LoginOutcome> {
        let claims = self
            .token_service
            .verify_token(refresh_token, TokenType::Refresh)
            .map_err(|e| {
                warn!("🔒 리프레시 토큰 거부: {}", e);
                AppError::ApiError(REFRESH_TOKEN_INVALID_MESSAGE.to_string())
            })?;

        let principal = self
            .user_service
            .get_principal(&claims.sub)
            .await
            .map_err(|e| match e {
                AppError::ApiError(_) => AppError::ApiError(REFRESH_TOKEN_INVALID_MESSAGE.to_string()),
                other => other,
            })?;
        ensure_can_authenticate(&principal)?;

        Ok(LoginOutcome::Authenticated {
            access_token: self.token_service.create_access_token(&principal)?,
            refresh_token: refresh_token.to_string(),
            user: principal.to_dto(),
        })
    }

    fn authenticated(&self, principal: &UserPrincipal) -> AppResult<LoginOutcome> {
        let tokens = self.token_service.generate_token_pair(principal)?;

        Ok(LoginOutcome::Authenticated {
            user: principal.to_dto(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}
