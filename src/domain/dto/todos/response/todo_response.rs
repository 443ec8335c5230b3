use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::entities::{Category, TodoItem};

#[derive(Debug, Clone, Serialize)]
pub struct TodoItemResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub date_of_execution: Option<DateTime<Utc>>,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<TodoItem> for TodoItemResponse {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            title: item.title,
            description: item.description,
            completed: item.completed,
            date_of_execution: item.date_of_execution.map(|d| d.to_chrono()),
            category: item.category,
            created_at: item.created_at.to_chrono(),
            updated_at: item.updated_at.map(|d| d.to_chrono()),
        }
    }
}
