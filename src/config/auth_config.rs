//! # Authentication Configuration Module
//!
//! OAuth 프로바이더, JWT 토큰, 이메일 발송 등 인증 관련 설정을 관리하는 모듈입니다.
//! Spring Security의 OAuth2 및 JWT 설정과 유사한 역할을 수행합니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 사용자명/패스워드 기반 인증 (이메일 확인 후 활성화)
//! 2. **Google OAuth 2.0**: Google 계정을 통한 소셜 로그인
//! 3. **Yandex OAuth 2.0**: Yandex ID 로그인
//! 4. **VK ID (PKCE)**: `code_verifier` / `code_challenge` 기반 로그인
//!
//! ## Spring Security 와의 비교
//!
//! | Spring Security | 이 모듈 |
//! |-----------------|---------|
//! | `oauth2.client.registration.*` | `OAuthProviderConfig` |
//! | `jwt.secret` | `JwtConfig::secret` |
//! | `spring.mail.*` | `EmailConfig` |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AuthConfig, AuthProvider};
//!
//! let config = AuthConfig::from_env()?;
//! if let Some(google) = config.provider(AuthProvider::Google) {
//!     println!("{}", google.auth_url);
//! }
//! ```

use std::env;
use jsonwebtoken::Algorithm;
use crate::config::{Environment, PasswordConfig, ServerConfig};
use crate::core::errors::{AppError, AppResult};

/// `JWT_SECRET` 이 없을 때 개발/테스트 환경에서만 쓰는 시크릿
const DEV_JWT_SECRET: &str = "dev-only-insecure-jwt-secret";

/// JWT 서명 설정
///
/// 대칭키 알고리즘(HS256/HS384/HS512)만 허용됩니다.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, algorithm: Algorithm) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
        }
    }

    /// `JWT_SECRET`, `JWT_ALGORITHM` 에서 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// Staging/Production 에서 `JWT_SECRET` 이 비어 있으면 `InternalError`
    pub fn from_env() -> AppResult<Self> {
        let secret = Self::resolve_secret(env::var("JWT_SECRET").ok(), &Environment::current())?;

        let algorithm = env::var("JWT_ALGORITHM")
            .ok()
            .map(|value| {
                Self::parse_algorithm(&value).unwrap_or_else(|| {
                    log::warn!("지원하지 않는 JWT_ALGORITHM '{}', HS256 사용", value);
                    Algorithm::HS256
                })
            })
            .unwrap_or(Algorithm::HS256);

        Ok(Self { secret, algorithm })
    }

    /// 시크릿이 없으면 Development/Test 에서만 개발용 값으로 대체합니다.
    pub fn resolve_secret(secret: Option<String>, environment: &Environment) -> AppResult<String> {
        if let Some(secret) = secret.filter(|s| !s.trim().is_empty()) {
            return Ok(secret);
        }

        match environment {
            Environment::Development | Environment::Test => {
                log::warn!("JWT_SECRET 미설정, 개발용 시크릿 사용 (환경: {:?})", environment);
                Ok(DEV_JWT_SECRET.to_string())
            }
            Environment::Staging | Environment::Production => Err(AppError::InternalError(format!(
                "JWT_SECRET 이 설정되지 않았습니다 (환경: {:?})",
                environment
            ))),
        }
    }

    pub fn parse_algorithm(value: &str) -> Option<Algorithm> {
        match value.to_uppercase().as_str() {
            "HS256" => Some(Algorithm::HS256),
            "HS384" => Some(Algorithm::HS384),
            "HS512" => Some(Algorithm::HS512),
            _ => None,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// 지원하는 인증 프로바이더
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Local,
    Google,
    Yandex,
    Vk,
}

impl AuthProvider {
    /// OAuth 로그인을 지원하는 프로바이더 목록
    pub const OAUTH: [AuthProvider; 3] = [AuthProvider::Google, AuthProvider::Yandex, AuthProvider::Vk];

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            "yandex" => Ok(AuthProvider::Yandex),
            "vk" => Ok(AuthProvider::Vk),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
            AuthProvider::Yandex => "yandex",
            AuthProvider::Vk => "vk",
        }
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            AuthProvider::Local => "LOCAL",
            AuthProvider::Google => "GOOGLE",
            AuthProvider::Yandex => "YANDEX",
            AuthProvider::Vk => "VK",
        }
    }

    /// (authorize, token, user-info) 기본 엔드포인트
    fn default_endpoints(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            AuthProvider::Google => (
                "https://accounts.google.com/o/oauth2/auth",
                "https://accounts.google.com/o/oauth2/token",
                "https://www.googleapis.com/oauth2/v2/userinfo",
            ),
            AuthProvider::Yandex => (
                "https://oauth.yandex.com/authorize",
                "https://oauth.yandex.ru/token",
                "https://login.yandex.ru/info",
            ),
            AuthProvider::Vk => (
                "https://id.vk.com/authorize",
                "https://id.vk.com/oauth2/token",
                "https://api.vk.com/method/users.get",
            ),
            AuthProvider::Local => ("", "", ""),
        }
    }
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth 2.0 클라이언트 등록 정보
///
/// 프로바이더 하나당 하나씩 생성되며, `{PREFIX}_CLIENT_ID` 가 없으면
/// 해당 프로바이더는 비활성화됩니다.
#[derive(Clone)]
pub struct OAuthProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub user_info_url: String,
    /// VK API 버전 (`v` 파라미터). 다른 프로바이더에서는 사용하지 않습니다.
    pub api_version: String,
}

impl OAuthProviderConfig {
    pub fn from_env(provider: AuthProvider) -> Option<Self> {
        if provider == AuthProvider::Local {
            return None;
        }

        let prefix = provider.env_prefix();
        let var = |name: &str| env::var(format!("{}_{}", prefix, name)).ok().filter(|v| !v.is_empty());

        let client_id = var("CLIENT_ID")?;
        let client_secret = var("CLIENT_SECRET").unwrap_or_else(|| {
            log::warn!("{}_CLIENT_SECRET 이 설정되지 않았습니다", prefix);
            String::new()
        });
        let (auth_url, token_url, user_info_url) = provider.default_endpoints();

        Some(Self {
            client_id,
            client_secret,
            redirect_uri: var("REDIRECT_URI").unwrap_or_else(|| {
                format!(
                    "{}/api/v1/auth/login/{}/callback",
                    ServerConfig::public_base_url(),
                    provider.as_str()
                )
            }),
            auth_url: var("AUTH_URL").unwrap_or_else(|| auth_url.to_string()),
            token_url: var("TOKEN_URL").unwrap_or_else(|| token_url.to_string()),
            user_info_url: var("USER_INFO_URL").unwrap_or_else(|| user_info_url.to_string()),
            api_version: var("API_VERSION").unwrap_or_else(|| "5.131".to_string()),
        })
    }
}

impl std::fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("user_info_url", &self.user_info_url)
            .finish()
    }
}

/// 확인 메일 발송 설정
///
/// `EMAIL_API_KEY` 와 `EMAIL_SENDER` 가 모두 있어야 HTTP API 발송이 활성화됩니다.
#[derive(Clone, Default)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub sender: Option<String>,
    pub public_base_url: String,
}

impl EmailConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("EMAIL_API_URL")
                .unwrap_or_else(|_| "https://api.brevo.com/v3/smtp/email".to_string()),
            api_key: env::var("EMAIL_API_KEY").ok().filter(|v| !v.is_empty()),
            sender: env::var("EMAIL_SENDER").ok().filter(|v| !v.is_empty()),
            public_base_url: ServerConfig::public_base_url(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.sender.is_some()
    }
}

/// 애플리케이션 시작 시 한 번 읽어 서비스에 주입하는 인증 설정 묶음
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub bcrypt_cost: u32,
    pub google: Option<OAuthProviderConfig>,
    pub yandex: Option<OAuthProviderConfig>,
    pub vk: Option<OAuthProviderConfig>,
}

impl AuthConfig {
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            google: OAuthProviderConfig::from_env(AuthProvider::Google),
            yandex: OAuthProviderConfig::from_env(AuthProvider::Yandex),
            vk: OAuthProviderConfig::from_env(AuthProvider::Vk),
        })
    }

    pub fn provider(&self, provider: AuthProvider) -> Option<&OAuthProviderConfig> {
        match provider {
            AuthProvider::Google => self.google.as_ref(),
            AuthProvider::Yandex => self.yandex.as_ref(),
            AuthProvider::Vk => self.vk.as_ref(),
            AuthProvider::Local => None,
        }
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("sender", &self.sender)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("local").unwrap(), AuthProvider::Local);
        assert_eq!(AuthProvider::from_str("google").unwrap(), AuthProvider::Google);
        assert_eq!(AuthProvider::from_str("Yandex").unwrap(), AuthProvider::Yandex);
        assert_eq!(AuthProvider::from_str("VK").unwrap(), AuthProvider::Vk);
        assert!(AuthProvider::from_str("github").is_err());
        assert!(AuthProvider::from_str("unknown").is_err());
    }

    #[test]
    fn test_auth_provider_roundtrip() {
        for provider in AuthProvider::OAUTH {
            assert_eq!(AuthProvider::from_str(provider.as_str()).unwrap(), provider);
        }
    }

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::Vk).unwrap();
        assert_eq!(json, "\"vk\"");
        let deserialized: AuthProvider = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, AuthProvider::Vk);
    }

    #[test]
    fn test_parse_algorithm_accepts_only_hmac() {
        assert_eq!(JwtConfig::parse_algorithm("hs256"), Some(Algorithm::HS256));
        assert_eq!(JwtConfig::parse_algorithm("HS384"), Some(Algorithm::HS384));
        assert_eq!(JwtConfig::parse_algorithm("HS512"), Some(Algorithm::HS512));
        assert_eq!(JwtConfig::parse_algorithm("RS256"), None);
        assert_eq!(JwtConfig::parse_algorithm("none"), None);
    }

    #[test]
    fn test_missing_jwt_secret_fails_outside_dev() {
        for environment in [Environment::Staging, Environment::Production] {
            let result = JwtConfig::resolve_secret(None, &environment);
            assert!(matches!(result, Err(AppError::InternalError(_))));
            assert!(JwtConfig::resolve_secret(Some("  ".to_string()), &environment).is_err());
        }
    }

    #[test]
    fn test_missing_jwt_secret_falls_back_in_dev() {
        for environment in [Environment::Development, Environment::Test] {
            let secret = JwtConfig::resolve_secret(None, &environment).unwrap();
            assert_eq!(secret, DEV_JWT_SECRET);
        }
        let explicit = JwtConfig::resolve_secret(Some("s3cret".to_string()), &Environment::Production);
        assert_eq!(explicit.unwrap(), "s3cret");
    }

    #[test]
    fn test_local_provider_has_no_oauth_config() {
        assert!(OAuthProviderConfig::from_env(AuthProvider::Local).is_none());
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let jwt = JwtConfig::new("top-secret", Algorithm::HS256);
        assert!(!format!("{:?}", jwt).contains("top-secret"));

        let email = EmailConfig {
            api_key: Some("brevo-key".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", email).contains("brevo-key"));
        assert!(!email.is_configured());
    }
}
