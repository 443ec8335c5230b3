use std::sync::Arc;
use mongodb::bson::DateTime;
use crate::{
    core::errors::{AppError, AppResult},
    domain::{
        dto::todos::request::{CreateTodoRequest, UpdateTodoRequest},
        entities::TodoItem,
    },
    repositories::TodoStore,
};

/// 사용자별 할 일 CRUD
///
/// 다른 사용자의 항목은 존재하지 않는 것과 같이 404 로 처리합니다.
pub struct TodoItemService {
    todos: Arc<dyn TodoStore>,
}

impl TodoItemService {
    pub fn new(todos: Arc<dyn TodoStore>) -> Self {
        Self { todos }
    }

    /// 최신순 목록
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<TodoItem>> {
        self.todos.list_by_user(user_id).await
    }

    pub async fn create(&self, user_id: &str, request: CreateTodoRequest) -> AppResult<TodoItem> {
        self.ensure_title_available(user_id, &request.title, None).await?;

        let item = TodoItem::new(
            user_id.to_string(),
            request.title,
            request.description,
            request.completed,
            request.date_of_execution.map(DateTime::from_chrono),
            request.category,
        );

        let created = self.todos.insert(item).await?;
        log::debug!("할 일 생성: {} (user {})", created.id, user_id);
        Ok(created)
    }

    pub async fn get(&self, user_id: &str, id: &str) -> AppResult<TodoItem> {
        self.todos
            .find_by_id(id)
            .await?
            .filter(|item| item.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("할 일을 찾을 수 없습니다".to_string()))
    }

    /// 전달된 필드만 변경합니다.
    pub async fn update(&self, user_id: &str, id: &str, request: UpdateTodoRequest) -> AppResult<TodoItem> {
        let mut item = self.get(user_id, id).await?;

        if request.is_empty() {
            return Ok(item);
        }

        if let Some(title) = request.title {
            if title != item.title {
                self.ensure_title_available(user_id, &title, Some(id)).await?;
            }
            item.title = title;
        }
        if let Some(description) = request.description {
            item.description = Some(description);
        }
        if let Some(completed) = request.completed {
            item.completed = completed;
        }
        if let Some(date) = request.date_of_execution {
            item.date_of_execution = Some(DateTime::from_chrono(date));
        }
        if let Some(category) = request.category {
            item.category = category;
        }
        item.updated_at = Some(DateTime::now());

        if !self.todos.replace(&item).await? {
            return Err(AppError::NotFound("할 일을 찾을 수 없습니다".to_string()));
        }

        Ok(item)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        let item = self.get(user_id, id).await?;

        if !self.todos.delete(&item.id).await? {
            return Err(AppError::NotFound("할 일을 찾을 수 없습니다".to_string()));
        }

        Ok(())
    }

    async fn ensure_title_available(&self, user_id: &str, title: &str, except_id: Option<&str>) -> AppResult<()> {
        match self.todos.find_by_title(user_id, title).await? {
            Some(existing) if Some(existing.id.as_str()) != except_id => Err(AppError::BadRequest(
                "같은 제목의 할 일이 이미 있습니다".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
