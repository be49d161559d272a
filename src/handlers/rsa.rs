//! RS256 공개키 배포
use actix_web::{get, web, HttpResponse};

use crate::core::AppError;
use crate::services::auth::TokenService;

#[get("/.well-known/jwks.json")]
pub async fn jwks_handler(token_service: web::Data<TokenService>) -> Result<HttpResponse, AppError> {
    let jwks = token_service
        .jwks()
        .ok_or_else(|| AppError::NotFound("JWKS is only published for RS256 signing".to_string()))?;

    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "public, max-age=3600"))
        .json(jwks))
}
