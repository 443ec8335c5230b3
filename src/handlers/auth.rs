//! Authentication HTTP Handlers
//!
//! 로컬 로그인, OAuth 로그인(Google / Yandex / VK), 이메일 확인 엔드포인트입니다.
//!
//! - `POST /auth/login` - 폼 로그인, `?minutes=` 로 토큰 수명 지정
//! - `GET /auth/login/{provider}` - 프로바이더로 307 리다이렉트
//! - `GET /auth/login/{provider}/callback` - 콜백 처리 후 토큰 발급
//! - `GET /auth/confirm-email?token=` - 이메일 확인
use actix_web::{get, http::header, post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::{AppError, AppState},
    domain::dto::users::{
        request::{ConfirmEmailQuery, LoginForm, LoginQuery, OAuthCallbackQuery},
        response::{TokenResponse, UserResponse},
    },
};

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /auth/login?minutes=15` (`application/x-www-form-urlencoded`)
///
/// # Errors
///
/// * `401` - 사용자명 또는 비밀번호 불일치
/// * `400` - 이메일 확인 전 계정
/// * `422` - `minutes` 범위 초과
#[post("/login")]
pub async fn local_login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
    query: web::Query<LoginQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let user = state
        .auth
        .verify_credentials(&form.username, &form.password)
        .await?
        .ok_or_else(|| AppError::AuthenticationError("Incorrect username or password".to_string()))?;

    let token = state.auth.issue_session_token(&user, query.minutes)?;
    log::info!("로컬 로그인 성공: {} ({}분)", user.username, query.minutes);

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}

/// OAuth 로그인 시작
///
/// # Endpoint
/// `GET /auth/login/{provider}` → `307 Location: <authorization URL>`
#[get("/login/{provider}")]
pub async fn oauth_login(
    state: web::Data<AppState>,
    provider: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let redirect = state.oauth.begin_login(&provider).await?;

    Ok(HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, redirect.url))
        .finish())
}

/// OAuth 콜백 처리
///
/// # Endpoint
/// `GET /auth/login/{provider}/callback?code={code}&state={state}[&device_id=...]`
#[get("/login/{provider}/callback")]
pub async fn oauth_callback(
    state: web::Data<AppState>,
    provider: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let token = state.oauth.complete_login(&provider, &query).await?;
    Ok(HttpResponse::Ok().json(token))
}

/// 이메일 확인
///
/// # Endpoint
/// `GET /auth/confirm-email?token={token}`
#[get("/confirm-email")]
pub async fn confirm_email(
    state: web::Data<AppState>,
    query: web::Query<ConfirmEmailQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let user = state.users.confirm_email(&query.token).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
