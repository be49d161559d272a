//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::AppError;
use crate::domain::models::auth::{AuthenticatedUser, RequiredAuthority};
use crate::domain::models::token::TokenType;
use crate::services::auth::{TokenService, LOGIN_REQUIRED_MESSAGE};

pub const PERMISSION_DENIED_MESSAGE: &str = "You don't have enough permission";

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_authority: RequiredAuthority,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_authority = self.required_authority.clone();

        Box::pin(async move {
            let user = match authenticate(&req) {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("인증 실패 {} {}: {}", req.method(), req.path(), err);
                    return Ok(reject(req, err));
                }
            };

            if !required_authority.is_satisfied(&user.authorities) {
                log::warn!(
                    "권한 부족: {} ({:?}), 필요 권한: {}",
                    user.email, user.authorities, required_authority.0
                );
                return Ok(reject(req, AppError::AccessDenied(PERMISSION_DENIED_MESSAGE.to_string())));
            }

            log::debug!("인증 성공: {}", user.email);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// `Authorization` 헤더의 액세스 토큰을 검증합니다.
fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let token_service = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::InternalError("TokenService가 등록되지 않았습니다".to_string()))?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationRequired(LOGIN_REQUIRED_MESSAGE.to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token, TokenType::Access)?;

    Ok(AuthenticatedUser::from(claims))
}
