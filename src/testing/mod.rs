//! 테스트용 인메모리 저장소와 메일 발송기
//!
//! MongoDB 없이 서비스와 핸들러를 검증할 때 사용합니다.
//! `testing` feature 또는 단위 테스트에서만 컴파일됩니다.

use std::sync::{Arc, Mutex, MutexGuard};
use async_trait::async_trait;
use jsonwebtoken::Algorithm;
use crate::{
    caching::MemoryStateStore,
    config::JwtConfig,
    core::{
        errors::{AppError, AppResult},
        AppComponents, AppState,
    },
    domain::entities::{TodoItem, User},
    repositories::{TodoStore, UserStore, UserUpdate},
    services::{
        auth::{providers::ProviderRegistry, TokenService},
        email::EmailSender,
    },
};

pub const TEST_JWT_SECRET: &str = "task-pilot-test-secret";

/// 인메모리 구성요소로 조립한 [`AppState`] 와 각 대역에 대한 핸들
pub struct TestContext {
    pub state: AppState,
    pub users: Arc<MemoryUserStore>,
    pub todos: Arc<MemoryTodoStore>,
    pub states: Arc<MemoryStateStore>,
    pub email: Arc<RecordingEmailSender>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_providers(ProviderRegistry::new())
    }

    pub fn with_providers(providers: ProviderRegistry) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let todos = Arc::new(MemoryTodoStore::new());
        let states = Arc::new(MemoryStateStore::new());
        let email = Arc::new(RecordingEmailSender::new());

        let state = AppState::new(AppComponents {
            tokens: Arc::new(TokenService::new(&JwtConfig::new(TEST_JWT_SECRET, Algorithm::HS256))),
            bcrypt_cost: 4,
            user_store: users.clone(),
            todo_store: todos.clone(),
            state_store: states.clone(),
            email: email.clone(),
            providers,
        });

        Self {
            state,
            users,
            todos,
            states,
            email,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| AppError::InternalError("인메모리 저장소 잠금 실패".to_string()))
}

/// `users` 컬렉션 대역
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(lock(&self.users)?.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str, active_only: bool) -> AppResult<Option<User>> {
        Ok(lock(&self.users)?
            .iter()
            .find(|u| u.username == username && (!active_only || u.is_active))
            .cloned())
    }

    async fn find_by_email(&self, email: &str, active_only: bool) -> AppResult<Option<User>> {
        Ok(lock(&self.users)?
            .iter()
            .find(|u| u.email == email && (!active_only || u.is_active))
            .cloned())
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        let mut users = lock(&self.users)?;
        if users.iter().any(|u| u.username == user.username || u.email == user.email) {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명 또는 이메일입니다".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update_fields(&self, id: &str, update: UserUpdate) -> AppResult<Option<User>> {
        let mut users = lock(&self.users)?;
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            update.apply(user);
            user.clone()
        }))
    }
}

/// `todo_items` 컬렉션 대역. 목록은 삽입 역순입니다.
#[derive(Default)]
pub struct MemoryTodoStore {
    items: Mutex<Vec<TodoItem>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<TodoItem>> {
        Ok(lock(&self.items)?
            .iter()
            .rev()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<TodoItem>> {
        Ok(lock(&self.items)?.iter().find(|item| item.id == id).cloned())
    }

    async fn find_by_title(&self, user_id: &str, title: &str) -> AppResult<Option<TodoItem>> {
        Ok(lock(&self.items)?
            .iter()
            .find(|item| item.user_id == user_id && item.title == title)
            .cloned())
    }

    async fn insert(&self, item: TodoItem) -> AppResult<TodoItem> {
        let mut items = lock(&self.items)?;
        if items.iter().any(|i| i.user_id == item.user_id && i.title == item.title) {
            return Err(AppError::BadRequest("같은 제목의 할 일이 이미 있습니다".to_string()));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn replace(&self, item: &TodoItem) -> AppResult<bool> {
        let mut items = lock(&self.items)?;
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                *existing = item.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut items = lock(&self.items)?;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() != before)
    }
}

/// 발송 요청을 기록하는 메일 발송기
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기록은 하되 항상 실패를 반환합니다.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `(수신자, 토큰)` 목록
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, token)| token)
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_confirmation_email(&self, to: &str, token: &str) -> AppResult<()> {
        lock(&self.sent)?.push((to.to_string(), token.to_string()));

        if self.fail {
            return Err(AppError::InternalError("메일 발송 실패 (테스트)".to_string()));
        }
        Ok(())
    }
}
