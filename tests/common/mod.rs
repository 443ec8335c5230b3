//! 통합 테스트 공통 도우미
#![allow(dead_code)]

use actix_web::http::header;
use task_pilot_backend::domain::entities::User;
use task_pilot_backend::domain::models::auth::Password;
use task_pilot_backend::repositories::{UserStore, UserUpdate};
use task_pilot_backend::testing::TestContext;

/// 인메모리 `AppState` 와 전체 라우트로 테스트 서비스를 만듭니다.
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.state.clone()))
                .configure(task_pilot_backend::routes::configure_all_routes),
        )
        .await
    };
}

pub const PASSWORD: &str = "password123";

/// 비밀번호 `PASSWORD` 로 활성 로컬 사용자를 만듭니다.
pub async fn active_user(ctx: &TestContext, username: &str, admin: bool) -> User {
    let hash = ctx.state.auth.hash_password(&Password::new(PASSWORD)).await.unwrap();
    let user = ctx
        .users
        .insert(User::new_local(
            username.to_string(),
            format!("{}@example.com", username),
            hash,
        ))
        .await
        .unwrap();

    ctx.users
        .update_fields(
            &user.id,
            UserUpdate {
                is_active: Some(true),
                is_admin: Some(admin),
            },
        )
        .await
        .unwrap()
        .unwrap()
}

pub fn session_token(ctx: &TestContext, user: &User) -> String {
    ctx.state.auth.issue_session_token(user, 15).unwrap()
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// URL 쿼리에서 파라미터 값을 꺼냅니다.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| urlencoding::decode(value).unwrap().into_owned())
}
