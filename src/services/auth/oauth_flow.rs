//! # 공통 OAuth 로그인 흐름
//!
//! 세 프로바이더가 같은 순서를 따릅니다.
//!
//! ```text
//! begin_login:    state 생성 (+ PKCE) ─► oauth_state:{state} 저장 (300초) ─► authorization URL
//!
//! complete_login: provider 확인 ─► error 파라미터 확인 ─► state 꺼내기 (한 번만)
//!                 ─► 일치 / 생성 시각 확인 ─► 코드 교환 + 사용자 정보
//!                 ─► 사용자 연결 또는 생성 ─► 15분 세션 토큰
//! ```
//!
//! state 는 검증 전에 저장소에서 제거되므로 같은 콜백을 다시 보내면 항상 실패합니다.

use std::sync::Arc;
use chrono::{Duration, Utc};
use crate::{
    caching::{oauth_state_key, StateStore, OAUTH_STATE_TTL_SECS},
    core::errors::{AppError, AppResult, StateError},
    domain::{
        dto::users::{request::{OAuthCallbackQuery, DEFAULT_TOKEN_MINUTES}, response::TokenResponse},
        models::oauth::{OAuthStateRecord, PkcePair},
    },
    services::auth::{providers::ProviderRegistry, AuthService},
};

/// 로그인 시작 결과
#[derive(Debug, Clone)]
pub struct LoginRedirect {
    pub url: String,
    pub state: String,
}

pub struct OAuthFlow {
    providers: ProviderRegistry,
    states: Arc<dyn StateStore>,
    auth: Arc<AuthService>,
}

impl OAuthFlow {
    pub fn new(providers: ProviderRegistry, states: Arc<dyn StateStore>, auth: Arc<AuthService>) -> Self {
        Self {
            providers,
            states,
            auth,
        }
    }

    /// state 를 저장하고 프로바이더 authorization URL 을 만듭니다.
    pub async fn begin_login(&self, provider_name: &str) -> AppResult<LoginRedirect> {
        let provider = self.providers.get(provider_name)?;

        let pkce = provider.uses_pkce().then(PkcePair::generate);
        let record = OAuthStateRecord::generate(pkce.as_ref().map(|p| p.verifier.clone()));

        self.states
            .put_json(&oauth_state_key(&record.state), &record, OAUTH_STATE_TTL_SECS)
            .await?;

        let url = provider.authorization_url(&record.state, pkce.as_ref());
        log::debug!("{} 로그인 시작", provider.kind());

        Ok(LoginRedirect {
            url,
            state: record.state,
        })
    }

    /// 콜백을 검증하고 세션 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - 모르거나 비활성화된 프로바이더
    /// * `AuthenticationError` - 프로바이더가 `error` 를 돌려준 경우
    /// * `ValidationError` - `code` 누락
    /// * `OAuthState` - state 누락/만료/불일치/재사용
    /// * `UpstreamAuthError` - 토큰 교환 또는 사용자 정보 조회 실패
    pub async fn complete_login(&self, provider_name: &str, query: &OAuthCallbackQuery) -> AppResult<TokenResponse> {
        let provider = self.providers.get(provider_name)?;
        let kind = provider.kind();

        if let Some(error) = &query.error {
            let description = query.error_description.as_deref().unwrap_or(error);
            log::warn!("{} 로그인 거부: {}", kind, description);
            return Err(AppError::AuthenticationError(format!("{} 인증 실패: {}", kind, description)));
        }

        let code = query
            .code
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::ValidationError("code 파라미터가 필요합니다".to_string()))?;

        let state = query
            .state
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(StateError::NotFoundOrExpired)?;

        let record: OAuthStateRecord = self
            .states
            .take_json(&oauth_state_key(state))
            .await?
            .ok_or(StateError::NotFoundOrExpired)?;

        if record.state != state {
            return Err(StateError::Mismatch.into());
        }

        if record.is_older_than(Duration::seconds(OAUTH_STATE_TTL_SECS as i64), Utc::now()) {
            return Err(StateError::ExpiredByAge.into());
        }

        let info = provider
            .fetch_user_info(code, &record, query.device_id.as_deref())
            .await?;

        let user = self.auth.resolve_or_provision_oauth_identity(kind, &info).await?;
        let token = self.auth.issue_session_token(&user, DEFAULT_TOKEN_MINUTES)?;

        Ok(TokenResponse::bearer(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jsonwebtoken::Algorithm;
    use crate::caching::MemoryStateStore;
    use crate::config::{AuthProvider, JwtConfig};
    use crate::domain::models::oauth::ProviderUserInfo;
    use crate::services::auth::{providers::OAuthProvider, TokenService};
    use crate::testing::MemoryUserStore;

    struct FakeProvider {
        kind: AuthProvider,
        pkce: bool,
    }

    #[async_trait]
    impl OAuthProvider for FakeProvider {
        fn kind(&self) -> AuthProvider {
            self.kind
        }

        fn uses_pkce(&self) -> bool {
            self.pkce
        }

        fn authorization_url(&self, state: &str, pkce: Option<&PkcePair>) -> String {
            match pkce {
                Some(pair) => format!("https://fake/authorize?state={}&code_challenge={}", state, pair.challenge),
                None => format!("https://fake/authorize?state={}", state),
            }
        }

        async fn fetch_user_info(
            &self,
            code: &str,
            record: &OAuthStateRecord,
            _device_id: Option<&str>,
        ) -> AppResult<ProviderUserInfo> {
            if code != "good-code" {
                return Err(AppError::upstream(400, "invalid_grant"));
            }
            if self.pkce && record.code_verifier.is_none() {
                return Err(AppError::BadRequest("code_verifier 누락".to_string()));
            }
            Ok(ProviderUserInfo {
                email: "oauth@example.com".to_string(),
                display_name: None,
            })
        }
    }

    struct Fixture {
        flow: OAuthFlow,
        states: Arc<MemoryStateStore>,
        users: Arc<MemoryUserStore>,
        auth: Arc<AuthService>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserStore::new());
        let states = Arc::new(MemoryStateStore::new());
        let tokens = Arc::new(TokenService::new(&JwtConfig::new("oauth-flow-test", Algorithm::HS256)));
        let auth = Arc::new(AuthService::new(users.clone(), tokens, 4));

        let mut providers = ProviderRegistry::new();
        providers.register(Arc::new(FakeProvider { kind: AuthProvider::Google, pkce: false }));
        providers.register(Arc::new(FakeProvider { kind: AuthProvider::Vk, pkce: true }));

        Fixture {
            flow: OAuthFlow::new(providers, states.clone(), auth.clone()),
            states,
            users,
            auth,
        }
    }

    fn callback(code: Option<&str>, state: Option<&str>) -> OAuthCallbackQuery {
        OAuthCallbackQuery {
            code: code.map(str::to_string),
            state: state.map(str::to_string),
            device_id: None,
            error: None,
            error_description: None,
        }
    }

    #[actix_web::test]
    async fn test_begin_login_stores_state() {
        let f = fixture();
        let redirect = f.flow.begin_login("google").await.unwrap();

        assert!(redirect.url.contains(&redirect.state));
        let stored = f.states.get(&oauth_state_key(&redirect.state)).await.unwrap().unwrap();
        let record: OAuthStateRecord = serde_json::from_str(&stored).unwrap();
        assert_eq!(record.state, redirect.state);
        assert!(record.code_verifier.is_none());
    }

    #[actix_web::test]
    async fn test_two_logins_get_independent_states() {
        let f = fixture();
        let a = f.flow.begin_login("google").await.unwrap();
        let b = f.flow.begin_login("google").await.unwrap();
        assert_ne!(a.state, b.state);

        f.flow
            .complete_login("google", &callback(Some("good-code"), Some(&a.state)))
            .await
            .unwrap();
        assert!(f.states.get(&oauth_state_key(&b.state)).await.unwrap().is_some());
        f.flow
            .complete_login("google", &callback(Some("good-code"), Some(&b.state)))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn test_pkce_provider_stores_verifier_matching_challenge() {
        let f = fixture();
        let redirect = f.flow.begin_login("vk").await.unwrap();

        let stored = f.states.get(&oauth_state_key(&redirect.state)).await.unwrap().unwrap();
        let record: OAuthStateRecord = serde_json::from_str(&stored).unwrap();
        let verifier = record.code_verifier.unwrap();
        assert!(redirect.url.contains(&PkcePair::challenge_for(&verifier)));
    }

    #[actix_web::test]
    async fn test_unknown_provider_is_not_found() {
        let f = fixture();
        assert!(matches!(f.flow.begin_login("github").await, Err(AppError::NotFound(_))));
        assert!(matches!(f.flow.begin_login("yandex").await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_complete_login_issues_token_once() {
        let f = fixture();
        let redirect = f.flow.begin_login("google").await.unwrap();

        let token = f
            .flow
            .complete_login("google", &callback(Some("good-code"), Some(&redirect.state)))
            .await
            .unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(f.users.len(), 1);

        let replay = f
            .flow
            .complete_login("google", &callback(Some("good-code"), Some(&redirect.state)))
            .await;
        assert!(matches!(replay, Err(AppError::OAuthState(StateError::NotFoundOrExpired))));
    }

    #[actix_web::test]
    async fn test_state_is_consumed_even_when_exchange_fails() {
        let f = fixture();
        let redirect = f.flow.begin_login("google").await.unwrap();

        let failed = f
            .flow
            .complete_login("google", &callback(Some("bad-code"), Some(&redirect.state)))
            .await;
        assert!(matches!(failed, Err(AppError::UpstreamAuthError { status: 400, .. })));
        assert!(f.states.get(&oauth_state_key(&redirect.state)).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_missing_parameters() {
        let f = fixture();
        assert!(matches!(
            f.flow.complete_login("google", &callback(None, Some("s"))).await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            f.flow.complete_login("google", &callback(Some("good-code"), None)).await,
            Err(AppError::OAuthState(StateError::NotFoundOrExpired))
        ));
    }

    #[actix_web::test]
    async fn test_provider_error_is_unauthorized() {
        let f = fixture();
        let mut query = callback(None, None);
        query.error = Some("access_denied".to_string());

        assert!(matches!(
            f.flow.complete_login("google", &query).await,
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_old_state_is_rejected() {
        let f = fixture();
        let mut record = OAuthStateRecord::generate(None);
        record.created_at = Utc::now() - Duration::seconds(301);
        let states: Arc<dyn StateStore> = f.states.clone();
        states.put_json(&oauth_state_key(&record.state), &record, 600).await.unwrap();

        let result = f
            .flow
            .complete_login("google", &callback(Some("good-code"), Some(&record.state)))
            .await;
        assert!(matches!(result, Err(AppError::OAuthState(StateError::ExpiredByAge))));
    }

    #[actix_web::test]
    async fn test_mismatched_record_is_rejected() {
        let f = fixture();
        let record = OAuthStateRecord::generate(None);
        let states: Arc<dyn StateStore> = f.states.clone();
        states.put_json(&oauth_state_key("other-state"), &record, 300).await.unwrap();

        let result = f
            .flow
            .complete_login("google", &callback(Some("good-code"), Some("other-state")))
            .await;
        assert!(matches!(result, Err(AppError::OAuthState(StateError::Mismatch))));
    }

    #[actix_web::test]
    async fn test_token_resolves_to_existing_user() {
        let f = fixture();
        let redirect = f.flow.begin_login("vk").await.unwrap();
        let token = f
            .flow
            .complete_login("vk", &callback(Some("good-code"), Some(&redirect.state)))
            .await
            .unwrap();

        let user = f.auth.authenticate_token(&token.access_token).await.unwrap();
        assert_eq!(user.email, "oauth@example.com");
        assert_eq!(user.auth_provider, AuthProvider::Vk);
    }
}
