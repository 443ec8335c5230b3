//! 사용자 관리 HTTP 핸들러
//!
//! - `POST /user/register` - 회원가입 (확인 메일 발송)
//! - `GET /user/me` - 현재 사용자 정보 (인증 필요)

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::{AppError, AppState},
    domain::{
        dto::users::{
            request::CreateUserRequest,
            response::{MessageResponse, UserResponse},
        },
        models::auth::AuthenticatedUser,
    },
};

/// 회원가입
///
/// 계정은 비활성 상태로 만들어지고, 이메일의 링크로 확인해야 로그인할 수 있습니다.
///
/// # Endpoint
/// `POST /user/register`
///
/// ```json
/// { "username": "alice", "email": "alice@example.com", "password": "password123" }
/// ```
///
/// # Errors
///
/// * `409` - 사용자명 또는 이메일 중복
/// * `422` - 필드 검증 실패
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.users.register_user(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(MessageResponse::new(
        "Пользователь добавлен! Подтвердите вашу электронную почту для активации аккаунта.",
    )))
}

#[get("/me")]
pub async fn get_current_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.users.get_user_by_id(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
