//! 인증된 요청의 사용자 정보
//!
//! `AuthMiddleware`가 액세스 토큰을 검증한 뒤 request extensions에 넣어 두고,
//! 핸들러는 extractor로 꺼내 씁니다.

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;
use crate::domain::models::token::TokenClaims;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub email: String,
    pub authorities: Vec<String>,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            email: claims.sub,
            authorities: claims.authorities,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationRequired(
                "You need to log in to access this resource".to_string(),
            ))),
        }
    }
}
