//! Todo Item Entity

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 할 일 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    #[default]
    Personal,
    Study,
    Sport,
    Other,
}

/// 사용자별 할 일 항목. 제목은 사용자 안에서 유일합니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_execution: Option<DateTime>,
    #[serde(default)]
    pub category: Category,
    pub created_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl TodoItem {
    pub fn new(
        user_id: String,
        title: String,
        description: Option<String>,
        completed: bool,
        date_of_execution: Option<DateTime>,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            title,
            description,
            completed,
            date_of_execution,
            category,
            created_at: DateTime::now(),
            updated_at: None,
        }
    }
}
