//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 생성, 검증을 담당합니다.
//! 서버에 토큰 상태를 저장하지 않으며, 서명·만료·발급자·대상·토큰 타입으로만 판단합니다.
//!
//! | 토큰 | subject | authorities | 기본 수명 |
//! |------|---------|-------------|-----------|
//! | access | 사용자 이메일 | 역할 권한 목록 | 30분 |
//! | refresh | 사용자 이메일 | 없음 | 5일 |
//!
//! 서명 알고리즘은 `JWT_ALGORITHM`으로 고릅니다. 기본값은 공유 비밀키 기반 HS512이고,
//! RS256을 선택하면 [`RsaKeyPair`]로 서명하고 JWKS를 공개합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, info};
use uuid::Uuid;

use crate::config::{JwtConfig, SigningAlgorithm};
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::auth::UserPrincipal;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenType};
use crate::services::auth::rsa_keys::RsaKeyPair;

pub const TOKEN_EXPIRED_MESSAGE: &str = "The Token has expired";
pub const TOKEN_UNTRUSTED_MESSAGE: &str = "The Token can't be trusted";
pub const TOKEN_TYPE_MESSAGE: &str = "Invalid token type";
pub const LOGIN_REQUIRED_MESSAGE: &str = "You need to log in to access this resource";

/// 토큰 발급 파라미터
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl TokenSettings {
    pub fn from_env() -> Self {
        Self {
            secret: JwtConfig::secret(),
            issuer: JwtConfig::issuer(),
            audience: JwtConfig::audience(),
            access_token_ttl: Duration::minutes(JwtConfig::access_token_minutes()),
            refresh_token_ttl: Duration::days(JwtConfig::refresh_token_days()),
        }
    }

    /// 기본 발급자/대상/수명에 비밀키만 지정한 설정
    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
            issuer: "invoice-manager".to_string(),
            audience: "invoice-manager-clients".to_string(),
            access_token_ttl: Duration::minutes(30),
            refresh_token_ttl: Duration::days(5),
        }
    }
}

pub struct TokenService {
    settings: TokenSettings,
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    rsa_keys: Option<RsaKeyPair>,
}

impl TokenService {
    /// HS512 공유 비밀키로 서명하는 서비스
    pub fn new(settings: TokenSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());

        Self {
            settings,
            algorithm: Algorithm::HS512,
            encoding_key,
            decoding_key,
            rsa_keys: None,
        }
    }

    /// RS256 키 쌍으로 서명하는 서비스
    pub fn with_rsa_keys(settings: TokenSettings, keys: RsaKeyPair) -> AppResult<Self> {
        Ok(Self {
            algorithm: Algorithm::RS256,
            encoding_key: keys.encoding_key()?,
            decoding_key: keys.decoding_key()?,
            rsa_keys: Some(keys),
            settings,
        })
    }

    /// 환경변수 설정으로 서비스를 만듭니다. RS256이면 키 파일을 읽거나 생성합니다.
    pub fn from_env() -> AppResult<Self> {
        let settings = TokenSettings::from_env();

        let service = match JwtConfig::algorithm() {
            SigningAlgorithm::Hs512 => Self::new(settings),
            SigningAlgorithm::Rs256 => {
                let keys = RsaKeyPair::load_or_generate(
                    &JwtConfig::private_key_path(),
                    &JwtConfig::public_key_path(),
                    &JwtConfig::key_id(),
                )?;
                Self::with_rsa_keys(settings, keys)?
            }
        };

        info!("🔐 JWT 서명 알고리즘: {:?}", service.algorithm);
        Ok(service)
    }

    /// 권한 목록을 담은 액세스 토큰
    pub fn create_access_token(&self, principal: &UserPrincipal) -> AppResult<String> {
        self.sign(
            principal.email(),
            TokenType::Access,
            principal.authorities(),
            self.settings.access_token_ttl,
        )
    }

    /// 권한 목록이 없는 리프레시 토큰
    pub fn create_refresh_token(&self, principal: &UserPrincipal) -> AppResult<String> {
        self.sign(
            principal.email(),
            TokenType::Refresh,
            Vec::new(),
            self.settings.refresh_token_ttl,
        )
    }

    pub fn generate_token_pair(&self, principal: &UserPrincipal) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(principal)?,
            refresh_token: self.create_refresh_token(principal)?,
        })
    }

    fn sign(&self, subject: &str, token_type: TokenType, authorities: Vec<String>, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
            authorities,
        };

        let mut header = Header::new(self.algorithm);
        header.kid = self.rsa_keys.as_ref().map(|keys| keys.key_id().to_string());

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 토큰을 검증하고 클레임을 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AppError::TokenExpired` - 만료된 토큰
    /// * `AppError::InvalidToken` - 서명/형식/발급자/대상 불일치, 또는 기대한 타입이 아닌 토큰
    pub fn verify_token(&self, token: &str, expected: TokenType) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[self.settings.issuer.as_str()]);
        validation.set_audience(&[self.settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired(TOKEN_EXPIRED_MESSAGE.to_string()),
                _ => {
                    debug!("토큰 검증 실패: {}", e);
                    AppError::InvalidToken(TOKEN_UNTRUSTED_MESSAGE.to_string())
                }
            })?;

        if claims.token_type != expected {
            return Err(AppError::InvalidToken(TOKEN_TYPE_MESSAGE.to_string()));
        }

        Ok(claims)
    }

    /// `Authorization: Bearer {token}` 헤더 값에서 토큰 부분만 꺼냅니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationRequired(LOGIN_REQUIRED_MESSAGE.to_string())),
        }
    }

    /// RS256일 때만 JWKS 문서를 돌려줍니다.
    pub fn jwks(&self) -> Option<serde_json::Value> {
        self.rsa_keys.as_ref().map(RsaKeyPair::jwks)
    }
}
