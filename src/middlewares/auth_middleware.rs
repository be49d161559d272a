//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를 request extensions에 넣습니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | `Authorization: Bearer ...` 헤더 없음/형식 오류 | 401 |
//! | 만료, 위조, 리프레시 토큰 사용 | 400 |
//! | 권한 부족 | 403 |

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::RequiredAuthority;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
///
/// 유효한 액세스 토큰이 없거나 토큰의 `authorities`에 요구 권한이 없으면 거부합니다.
pub struct AuthMiddleware {
    required_authority: RequiredAuthority,
}

impl AuthMiddleware {
    /// 특정 권한(`READ:USER` 등)을 요구하는 인증 미들웨어 생성
    pub fn required_with_authority(authority: &str) -> Self {
        Self {
            required_authority: RequiredAuthority(authority.to_string()),
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_authority: self.required_authority.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    use crate::domain::entities::users::{Role, User};
    use crate::domain::models::auth::{AuthenticatedUser, UserPrincipal};
    use crate::services::auth::{TokenService, TokenSettings};

    fn token_service() -> TokenService {
        TokenService::new(TokenSettings::with_secret("middleware-tests"))
    }

    fn principal(permission: &str) -> UserPrincipal {
        let mut user = User::new_registered(
            "Ana".to_string(),
            "Petrovic".to_string(),
            "ana@example.com".to_string(),
            "hash".to_string(),
        );
        user.enabled = true;
        UserPrincipal::new(user, Role::new("ROLE_TEST", permission))
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.email)
    }

    async fn call(authorization: Option<String>) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new().app_data(web::Data::new(token_service())).service(
                web::scope("/user")
                    .wrap(AuthMiddleware::required_with_authority("READ:USER"))
                    .route("/profile", web::get().to(whoami)),
            ),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/user/profile");
        if let Some(value) = authorization {
            req = req.insert_header(("Authorization", value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[actix_web::test]
    async fn test_missing_header_is_unauthorized() {
        let (status, body) = call(None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["reason"], "You need to log in to access this resource");
    }

    #[actix_web::test]
    async fn test_valid_token_passes() {
        let token = token_service().create_access_token(&principal("READ:USER")).unwrap();
        let (status, _) = call(Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_missing_authority_is_forbidden() {
        let token = token_service().create_access_token(&principal("READ:CUSTOMER")).unwrap();
        let (status, body) = call(Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["reason"], "You don't have enough permission");
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_accepted() {
        let token = token_service().create_refresh_token(&principal("READ:USER")).unwrap();
        let (status, body) = call(Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "Invalid token type");
    }

    #[actix_web::test]
    async fn test_untrusted_token_is_bad_request() {
        let (status, body) = call(Some("Bearer not.a.token".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "The Token can't be trusted");
    }
}
