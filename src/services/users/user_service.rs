//! # 사용자 관리 서비스 구현
//!
//! 로컬 회원가입과 이메일 확인 흐름을 담당합니다.
//!
//! ```text
//! register_user ─► hash password ─► insert (inactive) ─► confirmation token
//!                                                          │
//!                        email_confirm:{token} → user id ◄─┘ (12h TTL)
//!                                                          │
//!                                   send confirmation email (실패는 로그만)
//!
//! confirm_email ─► get email_confirm:{token} ─► activate ─► delete key
//! ```

use std::sync::Arc;
use crate::{
    caching::{email_confirm_key, StateStore, EMAIL_CONFIRM_TTL_SECS},
    core::errors::{AppError, AppResult},
    domain::{dto::users::request::CreateUserRequest, entities::User},
    repositories::{UserStore, UserUpdate},
    services::{auth::AuthService, email::EmailSender},
};

pub struct UserService {
    users: Arc<dyn UserStore>,
    states: Arc<dyn StateStore>,
    auth: Arc<AuthService>,
    email: Arc<dyn EmailSender>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        states: Arc<dyn StateStore>,
        auth: Arc<AuthService>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            users,
            states,
            auth,
            email,
        }
    }

    /// 비활성 사용자를 만들고 확인 메일을 보냅니다.
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 사용자명 또는 이메일 중복
    pub async fn register_user(&self, request: CreateUserRequest) -> AppResult<User> {
        let password_hash = self.auth.hash_password(&request.password).await?;
        let user = self
            .users
            .insert(User::new_local(request.username, request.email, password_hash))
            .await?;

        let token = self.auth.issue_email_confirmation_token()?;
        self.states
            .put(&email_confirm_key(&token), &user.id, EMAIL_CONFIRM_TTL_SECS)
            .await?;

        if let Err(e) = self.email.send_confirmation_email(&user.email, &token).await {
            log::error!("확인 메일 발송 실패 ({}): {}", user.email, e);
        }

        log::info!("새 사용자 등록: {} ({})", user.username, user.id);
        Ok(user)
    }

    /// 확인 토큰을 소비하고 사용자를 활성화합니다.
    pub async fn confirm_email(&self, token: &str) -> AppResult<User> {
        let key = email_confirm_key(token);

        let user_id = self
            .states
            .get(&key)
            .await?
            .ok_or_else(|| AppError::BadRequest("Токен недействителен или истёк".to_string()))?;

        let user = self
            .users
            .update_fields(&user_id, UserUpdate::activate())
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        self.states.delete(&key).await?;

        log::info!("이메일 확인 완료: {}", user.id);
        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: &str) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::MemoryStateStore;
    use crate::config::JwtConfig;
    use crate::domain::models::auth::Password;
    use crate::services::auth::TokenService;
    use crate::testing::{MemoryUserStore, RecordingEmailSender};
    use jsonwebtoken::Algorithm;

    struct Fixture {
        service: UserService,
        states: Arc<MemoryStateStore>,
        email: Arc<RecordingEmailSender>,
    }

    fn fixture(email: RecordingEmailSender) -> Fixture {
        let users = Arc::new(MemoryUserStore::new());
        let states = Arc::new(MemoryStateStore::new());
        let email = Arc::new(email);
        let tokens = Arc::new(TokenService::new(&JwtConfig::new("user-service-test", Algorithm::HS256)));
        let auth = Arc::new(AuthService::new(users.clone(), tokens, 4));

        Fixture {
            service: UserService::new(users, states.clone(), auth, email.clone()),
            states,
            email,
        }
    }

    fn request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: Password::new("password123"),
        }
    }

    #[actix_web::test]
    async fn test_register_then_confirm() {
        let f = fixture(RecordingEmailSender::new());

        let user = f.service.register_user(request("alice", "alice@example.com")).await.unwrap();
        assert!(!user.is_active);

        let token = f.email.last_token_for("alice@example.com").unwrap();
        assert_eq!(
            f.states.get(&email_confirm_key(&token)).await.unwrap().as_deref(),
            Some(user.id.as_str())
        );

        let confirmed = f.service.confirm_email(&token).await.unwrap();
        assert!(confirmed.is_active);
        assert!(f.states.get(&email_confirm_key(&token)).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_confirm_twice_fails() {
        let f = fixture(RecordingEmailSender::new());
        f.service.register_user(request("alice", "alice@example.com")).await.unwrap();
        let token = f.email.last_token_for("alice@example.com").unwrap();

        f.service.confirm_email(&token).await.unwrap();
        assert!(matches!(f.service.confirm_email(&token).await, Err(AppError::BadRequest(_))));
    }

    #[actix_web::test]
    async fn test_unknown_token_is_bad_request() {
        let f = fixture(RecordingEmailSender::new());
        assert!(matches!(f.service.confirm_email("nope").await, Err(AppError::BadRequest(_))));
    }

    #[actix_web::test]
    async fn test_duplicate_registration_conflicts() {
        let f = fixture(RecordingEmailSender::new());
        f.service.register_user(request("alice", "alice@example.com")).await.unwrap();

        let same_email = f.service.register_user(request("alice2", "alice@example.com")).await;
        assert!(matches!(same_email, Err(AppError::ConflictError(_))));

        let same_name = f.service.register_user(request("alice", "other@example.com")).await;
        assert!(matches!(same_name, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_email_failure_does_not_fail_registration() {
        let f = fixture(RecordingEmailSender::failing());
        let user = f.service.register_user(request("bob", "bob@example.com")).await.unwrap();

        assert_eq!(f.service.get_user_by_id(&user.id).await.unwrap().username, "bob");
    }
}
