//! 할 일 HTTP 핸들러 (인증 필요)
//!
//! 모든 핸들러는 인증된 사용자 자신의 항목만 다룹니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::{
    core::{AppError, AppState},
    domain::{
        dto::todos::{
            request::{CreateTodoRequest, UpdateTodoRequest},
            response::TodoItemResponse,
        },
        models::auth::AuthenticatedUser,
    },
};

/// `GET /todo_items/all` - 최신순
#[get("/all")]
pub async fn list_todo_items(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let items: Vec<TodoItemResponse> = state
        .todos
        .list(&user.user_id)
        .await?
        .into_iter()
        .map(TodoItemResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(items))
}

/// `POST /todo_items` → 201
#[post("")]
pub async fn create_todo_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateTodoRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let item = state.todos.create(&user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(TodoItemResponse::from(item)))
}

#[get("/{id}")]
pub async fn get_todo_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let item = state.todos.get(&user.user_id, &id).await?;
    Ok(HttpResponse::Ok().json(TodoItemResponse::from(item)))
}

#[patch("/{id}")]
pub async fn update_todo_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    id: web::Path<String>,
    payload: web::Json<UpdateTodoRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let item = state.todos.update(&user.user_id, &id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TodoItemResponse::from(item)))
}

#[delete("/{id}")]
pub async fn delete_todo_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.todos.delete(&user.user_id, &id).await?;
    Ok(HttpResponse::Ok().json(json!({ "detail": "Элемент списка дел успешно удален" })))
}
