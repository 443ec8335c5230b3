//! Yandex ID OAuth 2.0 클라이언트
//!
//! 토큰 교환은 Google 과 같은 `authorization_code` 폼 요청이고,
//! 사용자 정보 조회는 `Authorization: OAuth <token>` 헤더를 사용합니다.
//! 이메일은 `default_email` 필드에서 읽습니다.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use crate::config::{AuthProvider, OAuthProviderConfig};
use crate::core::errors::AppResult;
use crate::domain::models::oauth::{OAuthStateRecord, PkcePair, ProviderUserInfo};
use super::{build_url, exchange_code, required_email, send_json, OAuthProvider};

pub struct YandexProvider {
    config: OAuthProviderConfig,
    http: reqwest::Client,
}

impl YandexProvider {
    pub const SCOPE: &'static str = "login:email login:info";

    pub fn new(config: OAuthProviderConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    fn display_name(info: &Value) -> Option<String> {
        ["real_name", "display_name", "login"]
            .iter()
            .find_map(|field| info.get(*field).and_then(Value::as_str))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
impl OAuthProvider for YandexProvider {
    fn kind(&self) -> AuthProvider {
        AuthProvider::Yandex
    }

    fn authorization_url(&self, state: &str, _pkce: Option<&PkcePair>) -> String {
        build_url(
            &self.config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", Self::SCOPE),
                ("state", state),
            ],
        )
    }

    async fn fetch_user_info(
        &self,
        code: &str,
        _record: &OAuthStateRecord,
        _device_id: Option<&str>,
    ) -> AppResult<ProviderUserInfo> {
        let token = exchange_code(&self.http, &self.config, self.kind(), code).await?;

        let info = send_json(
            self.http
                .get(&self.config.user_info_url)
                .header(AUTHORIZATION, format!("OAuth {}", token)),
            self.kind(),
            "사용자 정보 조회",
        )
        .await?;

        let email = required_email(info.get("default_email"), self.kind())?;

        Ok(ProviderUserInfo {
            email,
            display_name: Self::display_name(&info),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_fallback_order() {
        let info = json!({"login": "ivan", "display_name": "Ваня"});
        assert_eq!(YandexProvider::display_name(&info).as_deref(), Some("Ваня"));
        assert_eq!(YandexProvider::display_name(&json!({"login": "ivan"})).as_deref(), Some("ivan"));
        assert!(YandexProvider::display_name(&json!({})).is_none());
    }
}
