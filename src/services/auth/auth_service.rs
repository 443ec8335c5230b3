//! # 인증 서비스
//!
//! 로컬 자격 증명 확인, 세션 토큰 발급, OAuth 사용자 연결을 담당합니다.
//!
//! ## 자격 증명 확인 결과
//!
//! | 상황 | 결과 | HTTP |
//! |------|------|------|
//! | 사용자 없음 / 비밀번호 불일치 | `Ok(None)` | 401 |
//! | 비밀번호 일치, 이메일 미확인 | `Err(InactiveAccount)` | 400 |
//! | 비밀번호 일치, 활성 계정 | `Ok(Some(user))` | 200 |
//!
//! OAuth 로 생성된 계정은 비밀번호 해시가 비어 있으므로 비밀번호로는 로그인할 수 없습니다.
//! bcrypt 해싱과 검증은 `spawn_blocking` 으로 워커 스레드 밖에서 실행됩니다.

use std::sync::Arc;
use actix_web::rt::task::spawn_blocking;
use chrono::Duration;
use serde_json::json;
use uuid::Uuid;
use crate::config::AuthProvider;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::entities::User;
use crate::domain::models::auth::Password;
use crate::domain::models::oauth::ProviderUserInfo;
use crate::repositories::UserStore;
use crate::services::auth::token_service::{Claims, TokenService};

/// 세션 토큰 수명 허용 범위 (분)
pub const MIN_TOKEN_MINUTES: i64 = 1;
pub const MAX_TOKEN_MINUTES: i64 = 2880;

/// 이메일 확인 토큰 고정 subject
pub const EMAIL_CONFIRMATION_SUBJECT: &str = "email_confirmation";

/// 이메일 확인 토큰 수명 (시간)
pub const EMAIL_CONFIRMATION_HOURS: i64 = 12;

/// OAuth 사용자명 충돌 시 시도할 최대 접미사
const MAX_USERNAME_SUFFIX: u32 = 1000;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
        }
    }

    /// 사용자명과 비밀번호를 확인합니다.
    ///
    /// 활성 여부와 관계없이 사용자명으로 조회한 뒤 비밀번호를 검증하고,
    /// 비밀번호가 맞지만 이메일 확인 전인 계정은 `InactiveAccount` 로 거절합니다.
    pub async fn verify_credentials(&self, username: &str, password: &Password) -> AppResult<Option<User>> {
        let Some(user) = self.users.find_by_username(username, false).await? else {
            return Ok(None);
        };

        if !user.can_authenticate_with_password() {
            return Ok(None);
        }

        if !self.verify_password(password, &user.password_hash).await? {
            return Ok(None);
        }

        if !user.is_active {
            return Err(AppError::InactiveAccount);
        }

        Ok(Some(user))
    }

    pub async fn hash_password(&self, password: &Password) -> AppResult<String> {
        let password = password.clone();
        let cost = self.bcrypt_cost;

        spawn_blocking(move || bcrypt::hash(password.expose(), cost))
            .await
            .context("해싱 작업 실패")?
            .context("비밀번호 해싱 실패")
    }

    async fn verify_password(&self, password: &Password, hash: &str) -> AppResult<bool> {
        let password = password.clone();
        let hash = hash.to_string();

        let verified = spawn_blocking(move || bcrypt::verify(password.expose(), &hash))
            .await
            .context("검증 작업 실패")?;

        // 손상된 해시는 불일치로 취급
        Ok(verified.unwrap_or_else(|e| {
            log::warn!("bcrypt 검증 실패: {}", e);
            false
        }))
    }

    /// `{sub: user.id}` 세션 토큰을 발급합니다. 수명은 1-2880분.
    pub fn issue_session_token(&self, user: &User, minutes: i64) -> AppResult<String> {
        if !(MIN_TOKEN_MINUTES..=MAX_TOKEN_MINUTES).contains(&minutes) {
            return Err(AppError::ValidationError(format!(
                "토큰 수명은 {}-{}분 사이여야 합니다",
                MIN_TOKEN_MINUTES, MAX_TOKEN_MINUTES
            )));
        }

        let mut claims = Claims::new();
        claims.insert("sub".to_string(), json!(user.id));
        self.tokens.issue(&claims, Duration::minutes(minutes))
    }

    /// 이메일 확인용 토큰. 사용자와의 매핑은 상태 저장소가 보관합니다.
    pub fn issue_email_confirmation_token(&self) -> AppResult<String> {
        let mut claims = Claims::new();
        claims.insert("sub".to_string(), json!(EMAIL_CONFIRMATION_SUBJECT));
        claims.insert("jti".to_string(), json!(Uuid::new_v4().to_string()));
        self.tokens.issue(&claims, Duration::hours(EMAIL_CONFIRMATION_HOURS))
    }

    /// 세션 토큰으로 사용자를 찾습니다.
    ///
    /// - 토큰 검증 실패, `sub` 누락, 사용자 없음 → `AuthenticationError`
    /// - 비활성 사용자 → `InactiveAccount`
    pub async fn authenticate_token(&self, token: &str) -> AppResult<User> {
        let claims = self.tokens.verify(token)?;

        let user_id = claims
            .get("sub")
            .and_then(|sub| sub.as_str())
            .ok_or_else(|| AppError::AuthenticationError("Could not validate credentials".to_string()))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("Could not validate credentials".to_string()))?;

        if !user.is_active {
            return Err(AppError::InactiveAccount);
        }

        Ok(user)
    }

    /// 이메일로 기존 사용자를 찾고, 없으면 OAuth 사용자를 생성합니다.
    ///
    /// 기존 사용자는 가입 경로나 활성 상태와 관계없이 그대로 사용합니다.
    pub async fn resolve_or_provision_oauth_identity(
        &self,
        provider: AuthProvider,
        info: &ProviderUserInfo,
    ) -> AppResult<User> {
        if let Some(existing) = self.users.find_by_email(&info.email, false).await? {
            log::info!("{} 로그인: 기존 사용자 {}", provider, existing.id);
            return Ok(existing);
        }

        let mut user = User::new_oauth(provider, info.email.clone());
        user.username = self.unique_username(&user.username).await?;

        match self.users.insert(user).await {
            Ok(created) => {
                log::info!("새 {} 사용자 등록: {}", provider, created.id);
                Ok(created)
            }
            // 동시 최초 로그인
            Err(AppError::ConflictError(msg)) => self
                .users
                .find_by_email(&info.email, false)
                .await?
                .ok_or(AppError::ConflictError(msg)),
            Err(e) => Err(e),
        }
    }

    async fn unique_username(&self, base: &str) -> AppResult<String> {
        if self.users.find_by_username(base, false).await?.is_none() {
            return Ok(base.to_string());
        }

        for counter in 1..=MAX_USERNAME_SUFFIX {
            let candidate = format!("{}_{}", base, counter);
            if self.users.find_by_username(&candidate, false).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(AppError::InternalError("사용자명 생성 실패".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::repositories::UserUpdate;
    use crate::testing::MemoryUserStore;
    use jsonwebtoken::Algorithm;

    fn service(users: Arc<MemoryUserStore>) -> AuthService {
        let tokens = Arc::new(TokenService::new(&JwtConfig::new("auth-service-test", Algorithm::HS256)));
        AuthService::new(users, tokens, 4)
    }

    async fn local_user(auth: &AuthService, users: &MemoryUserStore, active: bool) -> User {
        let hash = auth.hash_password(&Password::new("correct-horse")).await.unwrap();
        let user = users
            .insert(User::new_local("alice".into(), "alice@example.com".into(), hash))
            .await
            .unwrap();
        if active {
            users.update_fields(&user.id, UserUpdate::activate()).await.unwrap().unwrap()
        } else {
            user
        }
    }

    #[actix_web::test]
    async fn test_inactive_user_with_correct_password_is_rejected() {
        let users = Arc::new(MemoryUserStore::new());
        let auth = service(users.clone());
        local_user(&auth, &users, false).await;

        let result = auth.verify_credentials("alice", &Password::new("correct-horse")).await;
        assert!(matches!(result, Err(AppError::InactiveAccount)));
    }

    #[actix_web::test]
    async fn test_inactive_user_with_wrong_password_is_unknown() {
        let users = Arc::new(MemoryUserStore::new());
        let auth = service(users.clone());
        local_user(&auth, &users, false).await;

        let result = auth.verify_credentials("alice", &Password::new("wrong")).await.unwrap();
        assert!(result.is_none());
    }

    #[actix_web::test]
    async fn test_active_user_verifies() {
        let users = Arc::new(MemoryUserStore::new());
        let auth = service(users.clone());
        let user = local_user(&auth, &users, true).await;

        let verified = auth.verify_credentials("alice", &Password::new("correct-horse")).await.unwrap();
        assert_eq!(verified.map(|u| u.id), Some(user.id));
        assert!(auth.verify_credentials("bob", &Password::new("correct-horse")).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_oauth_user_cannot_use_password() {
        let users = Arc::new(MemoryUserStore::new());
        let auth = service(users.clone());
        let info = ProviderUserInfo { email: "g@gmail.com".into(), display_name: None };
        let user = auth.resolve_or_provision_oauth_identity(AuthProvider::Google, &info).await.unwrap();

        assert!(auth.verify_credentials(&user.username, &Password::new("")).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_oauth_resolves_existing_local_identity() {
        let users = Arc::new(MemoryUserStore::new());
        let auth = service(users.clone());
        let local = local_user(&auth, &users, true).await;

        let info = ProviderUserInfo { email: "alice@example.com".into(), display_name: Some("Alice".into()) };
        let resolved = auth.resolve_or_provision_oauth_identity(AuthProvider::Yandex, &info).await.unwrap();

        assert_eq!(resolved.id, local.id);
        assert_eq!(users.len(), 1);
    }

    #[actix_web::test]
    async fn test_oauth_provisions_new_identity() {
        let users = Arc::new(MemoryUserStore::new());
        let auth = service(users.clone());
        let info = ProviderUserInfo { email: "ivan@yandex.ru".into(), display_name: None };

        let user = auth.resolve_or_provision_oauth_identity(AuthProvider::Yandex, &info).await.unwrap();
        assert_eq!(user.username, "yandex_ivan");
        assert!(user.is_active);
        assert!(!user.is_admin);
        assert!(user.password_hash.is_empty());
    }

    #[actix_web::test]
    async fn test_oauth_username_collision_gets_suffix() {
        let users = Arc::new(MemoryUserStore::new());
        let auth = service(users.clone());

        let first = ProviderUserInfo { email: "bob@gmail.com".into(), display_name: None };
        let second = ProviderUserInfo { email: "bob@googlemail.com".into(), display_name: None };
        auth.resolve_or_provision_oauth_identity(AuthProvider::Google, &first).await.unwrap();
        let user = auth.resolve_or_provision_oauth_identity(AuthProvider::Google, &second).await.unwrap();

        assert_eq!(user.username, "google_bob_1");
    }

    #[actix_web::test]
    async fn test_session_token_round_trip_and_range() {
        let users = Arc::new(MemoryUserStore::new());
        let auth = service(users.clone());
        let user = local_user(&auth, &users, true).await;

        let token = auth.issue_session_token(&user, 15).unwrap();
        assert_eq!(auth.authenticate_token(&token).await.unwrap().id, user.id);

        assert!(matches!(auth.issue_session_token(&user, 0), Err(AppError::ValidationError(_))));
        assert!(matches!(auth.issue_session_token(&user, 2881), Err(AppError::ValidationError(_))));
        assert!(auth.issue_session_token(&user, 2880).is_ok());
    }

    #[actix_web::test]
    async fn test_authenticate_token_rejects_inactive_and_unknown() {
        let users = Arc::new(MemoryUserStore::new());
        let auth = service(users.clone());
        let inactive = local_user(&auth, &users, false).await;

        let token = auth.issue_session_token(&inactive, 15).unwrap();
        assert!(matches!(auth.authenticate_token(&token).await, Err(AppError::InactiveAccount)));

        let ghost = User::new_oauth(AuthProvider::Google, "ghost@gmail.com".into());
        let token = auth.issue_session_token(&ghost, 15).unwrap();
        assert!(matches!(auth.authenticate_token(&token).await, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_confirmation_tokens_are_unique() {
        let auth = service(Arc::new(MemoryUserStore::new()));
        let a = auth.issue_email_confirmation_token().unwrap();
        let b = auth.issue_email_confirmation_token().unwrap();
        assert_ne!(a, b);
    }
}
