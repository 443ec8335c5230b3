//! # OAuth 2.0 프로바이더 클라이언트
//!
//! 프로바이더마다 하나의 [`OAuthProvider`] 구현을 두고, 로그인 흐름 자체는
//! [`OAuthFlow`](crate::services::auth::oauth_flow::OAuthFlow) 가 공통으로 처리합니다.
//!
//! | 프로바이더 | 구현 | 특징 |
//! |-----------|------|------|
//! | Google | [`GoogleProvider`] | `Bearer` user-info, `access_type=offline` |
//! | Yandex | [`YandexProvider`] | `Authorization: OAuth <token>` |
//! | VK ID | [`VkProvider`] | PKCE(S256), 이메일은 토큰 응답에 포함 |
//!
//! ## 업스트림 에러 매핑
//!
//! | 상황 | 결과 |
//! |------|------|
//! | 네트워크/타임아웃 | `UpstreamAuthError(503)` |
//! | 프로바이더 4xx | 같은 상태 코드 |
//! | 프로바이더 5xx | `UpstreamAuthError(502)` |
//! | 200 응답 본문의 `error` | `UpstreamAuthError(400)` |
//! | `access_token` 누락 / JSON 파싱 실패 | `UpstreamAuthError(502)` |
//! | 이메일 누락 | `UpstreamAuthError(400)` |

pub mod google;
pub mod yandex;
pub mod vk;

pub use google::GoogleProvider;
pub use yandex::YandexProvider;
pub use vk::VkProvider;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;
use crate::config::{AuthConfig, AuthProvider, OAuthProviderConfig};
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::oauth::{OAuthStateRecord, PkcePair, ProviderUserInfo};

/// 외부 호출 타임아웃
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// 프로바이더 호출에 공유하는 HTTP 클라이언트를 만듭니다.
pub fn build_http_client() -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("HTTP 클라이언트 생성 실패")
}

#[async_trait]
pub trait OAuthProvider: Send + Sync {
    fn kind(&self) -> AuthProvider;

    /// PKCE(`code_verifier`) 사용 여부
    fn uses_pkce(&self) -> bool {
        false
    }

    /// 사용자를 보낼 authorization URL
    fn authorization_url(&self, state: &str, pkce: Option<&PkcePair>) -> String;

    /// authorization code 를 교환하고 사용자 정보를 조회합니다.
    async fn fetch_user_info(
        &self,
        code: &str,
        record: &OAuthStateRecord,
        device_id: Option<&str>,
    ) -> AppResult<ProviderUserInfo>;
}

/// 활성화된 프로바이더 목록
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<AuthProvider, Arc<dyn OAuthProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 설정에 client id 가 있는 프로바이더만 등록합니다.
    pub fn from_config(config: &AuthConfig, http: reqwest::Client) -> Self {
        let mut registry = Self::new();

        if let Some(google) = &config.google {
            registry.register(Arc::new(GoogleProvider::new(google.clone(), http.clone())));
        }
        if let Some(yandex) = &config.yandex {
            registry.register(Arc::new(YandexProvider::new(yandex.clone(), http.clone())));
        }
        if let Some(vk) = &config.vk {
            registry.register(Arc::new(VkProvider::new(vk.clone(), http)));
        }

        registry
    }

    pub fn register(&mut self, provider: Arc<dyn OAuthProvider>) {
        log::info!("🔑 OAuth 프로바이더 활성화: {}", provider.kind());
        self.providers.insert(provider.kind(), provider);
    }

    /// 이름으로 프로바이더를 찾습니다. 모르거나 비활성화된 경우 `NotFound`.
    pub fn get(&self, name: &str) -> AppResult<Arc<dyn OAuthProvider>> {
        AuthProvider::from_str(name)
            .ok()
            .and_then(|kind| self.providers.get(&kind).cloned())
            .ok_or_else(|| AppError::NotFound(format!("지원하지 않는 OAuth 프로바이더입니다: {}", name)))
    }

    pub fn enabled(&self) -> Vec<AuthProvider> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }
}

/// 쿼리 파라미터를 URL 인코딩해 붙입니다.
pub(crate) fn build_url(base: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, separator, query)
}

/// 요청을 보내고 JSON 본문을 받습니다. 실패는 업스트림 에러 규칙에 따라 변환됩니다.
pub(crate) async fn send_json(request: RequestBuilder, provider: AuthProvider, step: &str) -> AppResult<Value> {
    let response = request.send().await.map_err(|e| {
        log::warn!("{} {} 요청 실패: {}", provider, step, e);
        AppError::upstream(503, format!("{} 서비스에 연결할 수 없습니다", provider))
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        log::warn!("{} {} 응답 수신 실패: {}", provider, step, e);
        AppError::upstream(502, format!("{} 응답을 읽을 수 없습니다", provider))
    })?;

    if status.is_client_error() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|json| error_message(&json))
            .unwrap_or_else(|| format!("{} {} 실패", provider, step));
        return Err(AppError::upstream(status.as_u16(), message));
    }

    if !status.is_success() {
        log::warn!("{} {} 비정상 응답: {}", provider, step, status);
        return Err(AppError::upstream(502, format!("{} {} 실패", provider, step)));
    }

    serde_json::from_str(&body).map_err(|_| {
        AppError::upstream(502, format!("{} {} 응답 형식이 올바르지 않습니다", provider, step))
    })
}

/// 본문의 `error` / `error_description` 에서 메시지를 꺼냅니다.
pub(crate) fn error_message(json: &Value) -> Option<String> {
    let error = json.get("error")?;
    let description = json
        .get("error_description")
        .and_then(Value::as_str)
        .map(str::to_string);

    description.or_else(|| match error {
        Value::String(s) => Some(s.clone()),
        other => other
            .get("error_msg")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| Some(other.to_string())),
    })
}

pub(crate) fn access_token(json: &Value, provider: AuthProvider) -> AppResult<String> {
    json.get("access_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::upstream(502, format!("{} 응답에 access_token 이 없습니다", provider)))
}

pub(crate) fn required_email(value: Option<&Value>, provider: AuthProvider) -> AppResult<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::upstream(400, format!("{} 계정에서 이메일을 받을 수 없습니다", provider)))
}

/// `authorization_code` 그랜트로 토큰을 교환합니다 (Google, Yandex 공통).
pub(crate) async fn exchange_code(
    http: &reqwest::Client,
    config: &OAuthProviderConfig,
    provider: AuthProvider,
    code: &str,
) -> AppResult<String> {
    let params = [
        ("code", code),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("grant_type", "authorization_code"),
    ];

    let json = send_json(http.post(&config.token_url).form(&params), provider, "토큰 교환").await?;
    access_token(&json, provider)
}
