//! RS256 서명용 RSA 키 쌍
//!
//! `JWT_ALGORITHM=RS256`일 때 [`TokenService`](super::TokenService)가 사용합니다.
//! 키 파일이 없으면 첫 시작 시 2048비트 키를 생성해 저장하고, 공개키는
//! `/.well-known/jwks.json`으로 배포됩니다.
//!
//! ```bash
//! # 직접 생성하려면
//! openssl genrsa -traditional -out secrets/jwt_private_key.pem 2048
//! openssl rsa -in secrets/jwt_private_key.pem -pubout -out secrets/jwt_public_key.pem
//! ```

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use jsonwebtoken::{DecodingKey, EncodingKey};
use log::info;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, LineEnding};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::core::errors::{AppResult, ErrorContext};

const RSA_KEY_BITS: usize = 2048;

pub struct RsaKeyPair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
    key_id: String,
}

impl RsaKeyPair {
    /// 메모리에서만 쓰는 새 키 쌍을 생성합니다.
    pub fn generate(key_id: &str) -> AppResult<Self> {
        let private_key =
            RsaPrivateKey::new(&mut rsa::rand_core::OsRng, RSA_KEY_BITS).context("RSA 키 생성 실패")?;
        let public_key = private_key.to_public_key();

        Ok(Self {
            private_key,
            public_key,
            key_id: key_id.to_string(),
        })
    }

    /// PEM 파일에서 키를 읽고, 둘 중 하나라도 없으면 새로 생성해 저장합니다.
    pub fn load_or_generate(private_key_path: &str, public_key_path: &str, key_id: &str) -> AppResult<Self> {
        if !Path::new(private_key_path).exists() || !Path::new(public_key_path).exists() {
            info!("🔑 JWT RSA 키가 없습니다. 새 키 쌍을 생성합니다");
            let pair = Self::generate(key_id)?;
            pair.save(private_key_path, public_key_path)?;
            return Ok(pair);
        }

        info!("🔑 기존 JWT RSA 키 로드: {}", private_key_path);

        let private_pem = fs::read_to_string(private_key_path)
            .with_context(|| format!("개인키 파일 읽기 실패 '{}'", private_key_path))?;
        let public_pem = fs::read_to_string(public_key_path)
            .with_context(|| format!("공개키 파일 읽기 실패 '{}'", public_key_path))?;

        Ok(Self {
            private_key: RsaPrivateKey::from_pkcs1_pem(&private_pem).context("개인키 PEM 파싱 실패")?,
            public_key: RsaPublicKey::from_public_key_pem(&public_pem).context("공개키 PEM 파싱 실패")?,
            key_id: key_id.to_string(),
        })
    }

    fn save(&self, private_key_path: &str, public_key_path: &str) -> AppResult<()> {
        if let Some(parent) = Path::new(private_key_path).parent() {
            fs::create_dir_all(parent).context("키 디렉토리 생성 실패")?;
        }
        if let Some(parent) = Path::new(public_key_path).parent() {
            fs::create_dir_all(parent).context("키 디렉토리 생성 실패")?;
        }

        let private_pem = self.private_key.to_pkcs1_pem(LineEnding::LF).context("개인키 인코딩 실패")?;
        fs::write(private_key_path, private_pem.as_bytes()).context("개인키 저장 실패")?;
        fs::write(public_key_path, self.public_pem()?.as_bytes()).context("공개키 저장 실패")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(private_key_path, fs::Permissions::from_mode(0o600))
                .context("개인키 권한 설정 실패")?;
            fs::set_permissions(public_key_path, fs::Permissions::from_mode(0o644))
                .context("공개키 권한 설정 실패")?;
        }

        info!("📁 개인키 저장: {}", private_key_path);
        info!("📁 공개키 저장: {}", public_key_path);
        Ok(())
    }

    fn public_pem(&self) -> AppResult<String> {
        self.public_key.to_public_key_pem(LineEnding::LF).context("공개키 인코딩 실패")
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn encoding_key(&self) -> AppResult<EncodingKey> {
        let pem = self.private_key.to_pkcs1_pem(LineEnding::LF).context("개인키 인코딩 실패")?;
        EncodingKey::from_rsa_pem(pem.as_bytes()).context("서명 키 생성 실패")
    }

    pub fn decoding_key(&self) -> AppResult<DecodingKey> {
        DecodingKey::from_rsa_pem(self.public_pem()?.as_bytes()).context("검증 키 생성 실패")
    }

    /// JWKS 문서 (`{"keys": [...]}`)
    pub fn jwks(&self) -> serde_json::Value {
        let n = general_purpose::URL_SAFE_NO_PAD.encode(self.public_key.n().to_bytes_be());
        let e = general_purpose::URL_SAFE_NO_PAD.encode(self.public_key.e().to_bytes_be());

        serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": self.key_id,
                "n": n,
                "e": e,
            }]
        })
    }
}
