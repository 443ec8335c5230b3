//! JWT 발급/검증 서비스
//!
//! 대칭키(HS256/HS384/HS512)로 서명된 compact JWS 를 다룹니다.
//! 검증은 서명과 만료(`now < exp`, leeway 0)만 확인하며,
//! 실패 원인은 구분하지 않고 하나의 [`InvalidToken`] 으로 보고합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let tokens = TokenService::new(&JwtConfig::from_env()?);
//!
//! let mut claims = Claims::new();
//! claims.insert("sub".into(), json!(user.id));
//! let jwt = tokens.issue(&claims, Duration::minutes(15))?;
//!
//! let verified = tokens.verify(&jwt)?;
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use thiserror::Error;
use crate::config::JwtConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

/// 토큰 클레임 (임의의 JSON 객체)
pub type Claims = Map<String, Value>;

/// 서명 불일치, 형식 오류, 만료, `exp` 누락을 모두 포괄하는 검증 실패
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid token")]
pub struct InvalidToken;

impl From<InvalidToken> for AppError {
    fn from(_: InvalidToken) -> Self {
        AppError::AuthenticationError("Could not validate credentials".to_string())
    }
}

pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            algorithm: config.algorithm,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// 클레임을 복사해 `exp = now + ttl` 을 추가하고 서명합니다.
    pub fn issue(&self, claims: &Claims, ttl: Duration) -> AppResult<String> {
        let mut claims = claims.clone();
        let exp = (Utc::now() + ttl).timestamp();
        claims.insert("exp".to_string(), Value::from(exp));

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .context("JWT 토큰 생성 실패")
    }

    /// 서명이 유효하고 현재 시각이 `exp` 보다 이전일 때만 클레임을 반환합니다.
    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| InvalidToken)?;

        let exp = claims.get("exp").and_then(Value::as_i64).ok_or(InvalidToken)?;
        if Utc::now().timestamp() >= exp {
            return Err(InvalidToken);
        }

        Ok(claims)
    }

    /// `Authorization` 헤더 값에서 Bearer 토큰을 추출합니다.
    ///
    /// 스킴 이름은 대소문자를 구분하지 않습니다 (RFC 7235).
    pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
        match auth_header.trim_start().split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
                Ok(token.trim())
            }
            _ => Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }
}
