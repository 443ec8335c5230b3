//! 관리자 HTTP 핸들러

use actix_web::{get, web, HttpResponse};
use validator::Validate;
use crate::{
    core::{AppError, AppState},
    domain::{
        dto::todos::{request::AdminTodoQuery, response::TodoItemResponse},
        models::auth::AuthenticatedUser,
    },
};

/// 지정한 사용자의 할 일 목록
///
/// # Endpoint
/// `GET /admin/todo_items?user_id={user_id}` (관리자 전용)
#[get("/todo_items")]
pub async fn list_user_todo_items(
    state: web::Data<AppState>,
    admin: AuthenticatedUser,
    query: web::Query<AdminTodoQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    log::info!("관리자 {} 가 사용자 {} 의 할 일을 조회", admin.user_id, query.user_id);

    let items: Vec<TodoItemResponse> = state
        .todos
        .list(&query.user_id)
        .await?
        .into_iter()
        .map(TodoItemResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(items))
}
