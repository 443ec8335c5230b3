//! 애플리케이션 공유 상태
//!
//! 서비스는 시작 시 한 번 만들어지고 `web::Data<AppState>` 로 핸들러와
//! 인증 미들웨어에 전달됩니다.

use std::sync::Arc;
use crate::{
    caching::StateStore,
    repositories::{TodoStore, UserStore},
    services::{
        auth::{providers::ProviderRegistry, AuthService, OAuthFlow, TokenService},
        email::EmailSender,
        todos::TodoItemService,
        users::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub oauth: Arc<OAuthFlow>,
    pub users: Arc<UserService>,
    pub todos: Arc<TodoItemService>,
}

/// [`AppState`] 조립에 필요한 외부 자원
pub struct AppComponents {
    pub tokens: Arc<TokenService>,
    pub bcrypt_cost: u32,
    pub user_store: Arc<dyn UserStore>,
    pub todo_store: Arc<dyn TodoStore>,
    pub state_store: Arc<dyn StateStore>,
    pub email: Arc<dyn EmailSender>,
    pub providers: ProviderRegistry,
}

impl AppState {
    pub fn new(components: AppComponents) -> Self {
        let AppComponents {
            tokens,
            bcrypt_cost,
            user_store,
            todo_store,
            state_store,
            email,
            providers,
        } = components;

        let auth = Arc::new(AuthService::new(user_store.clone(), tokens, bcrypt_cost));
        let oauth = Arc::new(OAuthFlow::new(providers, state_store.clone(), auth.clone()));
        let users = Arc::new(UserService::new(user_store, state_store, auth.clone(), email));
        let todos = Arc::new(TodoItemService::new(todo_store));

        Self {
            auth,
            oauth,
            users,
            todos,
        }
    }
}
