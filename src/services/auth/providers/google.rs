//! # Google OAuth 2.0 클라이언트
//!
//! ## 사용하는 Google API 엔드포인트
//!
//! | 용도 | 엔드포인트 | 메서드 |
//! |------|------------|--------|
//! | **Authorization** | `https://accounts.google.com/o/oauth2/auth` | GET |
//! | **Token Exchange** | `https://accounts.google.com/o/oauth2/token` | POST (form) |
//! | **User Info** | `https://www.googleapis.com/oauth2/v2/userinfo` | GET (Bearer) |
//!
//! 스코프는 `openid profile email` 이며 `access_type=offline` 으로 요청합니다.

use async_trait::async_trait;
use serde_json::Value;
use crate::config::{AuthProvider, OAuthProviderConfig};
use crate::core::errors::AppResult;
use crate::domain::models::oauth::{OAuthStateRecord, PkcePair, ProviderUserInfo};
use super::{build_url, exchange_code, required_email, send_json, OAuthProvider};

pub struct GoogleProvider {
    config: OAuthProviderConfig,
    http: reqwest::Client,
}

impl GoogleProvider {
    pub const SCOPE: &'static str = "openid profile email";

    pub fn new(config: OAuthProviderConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }
}

#[async_trait]
impl OAuthProvider for GoogleProvider {
    fn kind(&self) -> AuthProvider {
        AuthProvider::Google
    }

    fn authorization_url(&self, state: &str, _pkce: Option<&PkcePair>) -> String {
        build_url(
            &self.config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", Self::SCOPE),
                ("access_type", "offline"),
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
            self.http.get(&self.config.user_info_url).bearer_auth(&token),
            self.kind(),
            "사용자 정보 조회",
        )
        .await?;

        let email = required_email(info.get("email"), self.kind())?;
        log::info!("Google 사용자 확인: {}", email);

        Ok(ProviderUserInfo {
            email,
            display_name: info.get("name").and_then(Value::as_str).map(str::to_string),
        })
    }
}
