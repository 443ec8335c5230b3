//! VK ID OAuth 2.1 클라이언트 (PKCE)
//!
//! 1. authorization URL 에 `code_challenge` / `code_challenge_method=S256` 을 싣습니다.
//! 2. 콜백에서 state 레코드에 저장된 `code_verifier` 로 토큰을 교환합니다.
//!    VK 는 실패를 HTTP 200 + `error` 필드로 돌려주기도 합니다.
//! 3. 이메일은 토큰 응답의 `email` 필드에서, 이름은 `users.get` 의
//!    `response[0].first_name` / `last_name` 에서 가져옵니다.

use async_trait::async_trait;
use serde_json::Value;
use crate::config::{AuthProvider, OAuthProviderConfig};
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::oauth::{OAuthStateRecord, PkcePair, ProviderUserInfo};
use super::{access_token, build_url, error_message, required_email, send_json, OAuthProvider};

pub struct VkProvider {
    config: OAuthProviderConfig,
    http: reqwest::Client,
}

impl VkProvider {
    pub const SCOPE: &'static str = "email";

    pub fn new(config: OAuthProviderConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    async fn exchange_code(&self, code: &str, verifier: &str, device_id: Option<&str>) -> AppResult<Value> {
        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("code_verifier", verifier),
        ];
        if let Some(device_id) = device_id {
            params.push(("device_id", device_id));
        }

        let json = send_json(self.http.post(&self.config.token_url).form(&params), self.kind(), "토큰 교환").await?;

        if let Some(message) = error_message(&json) {
            return Err(AppError::upstream(400, message));
        }

        Ok(json)
    }

    /// `users.get` 으로 표시 이름을 조회합니다. 조회 실패는 로그만 남깁니다.
    async fn display_name(&self, token: &str, user_id: Option<String>) -> Option<String> {
        let user_id = user_id?;
        let request = self.http.get(&self.config.user_info_url).query(&[
            ("user_ids", user_id.as_str()),
            ("fields", "first_name,last_name"),
            ("access_token", token),
            ("v", self.config.api_version.as_str()),
        ]);

        match send_json(request, self.kind(), "users.get").await {
            Ok(json) => Self::name_from_users_get(&json),
            Err(e) => {
                log::warn!("VK users.get 실패: {}", e);
                None
            }
        }
    }

    fn name_from_users_get(json: &Value) -> Option<String> {
        let user = json.get("response")?.get(0)?;
        let name = ["first_name", "last_name"]
            .iter()
            .filter_map(|field| user.get(*field).and_then(Value::as_str))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        (!name.is_empty()).then_some(name)
    }

    fn user_id(json: &Value) -> Option<String> {
        match json.get("user_id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[async_trait]
impl OAuthProvider for VkProvider {
    fn kind(&self) -> AuthProvider {
        AuthProvider::Vk
    }

    fn uses_pkce(&self) -> bool {
        true
    }

    fn authorization_url(&self, state: &str, pkce: Option<&PkcePair>) -> String {
        let mut params = vec![
            ("response_type", "code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("scope", Self::SCOPE),
            ("state", state),
        ];
        if let Some(pkce) = pkce {
            params.push(("code_challenge", pkce.challenge.as_str()));
            params.push(("code_challenge_method", PkcePair::METHOD));
        }

        build_url(&self.config.auth_url, &params)
    }

    async fn fetch_user_info(
        &self,
        code: &str,
        record: &OAuthStateRecord,
        device_id: Option<&str>,
    ) -> AppResult<ProviderUserInfo> {
        let verifier = record
            .code_verifier
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("code_verifier 가 없는 state 입니다".to_string()))?;

        let token_data = self.exchange_code(code, verifier, device_id).await?;
        let token = access_token(&token_data, self.kind())?;
        let email = required_email(token_data.get("email"), self.kind())?;
        let display_name = self.display_name(&token, Self::user_id(&token_data)).await;

        Ok(ProviderUserInfo { email, display_name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_from_users_get() {
        let body = json!({"response": [{"id": 1, "first_name": "Павел", "last_name": "Дуров"}]});
        assert_eq!(VkProvider::name_from_users_get(&body).as_deref(), Some("Павел Дуров"));
        assert!(VkProvider::name_from_users_get(&json!({"response": []})).is_none());
        assert!(VkProvider::name_from_users_get(&json!({"error": {"error_code": 5}})).is_none());
    }

    #[test]
    fn test_user_id_accepts_number_or_string() {
        assert_eq!(VkProvider::user_id(&json!({"user_id": 42})).as_deref(), Some("42"));
        assert_eq!(VkProvider::user_id(&json!({"user_id": "42"})).as_deref(), Some("42"));
        assert!(VkProvider::user_id(&json!({})).is_none());
    }
}
