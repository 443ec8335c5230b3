//! # 할 일 요청 DTO
//!
//! ## 검증 규칙
//!
//! - `title`: 1-100자, 사용자 안에서 유일 (서비스 계층에서 확인)
//! - `description`: 최대 500자
//! - `category`: work / personal / study / sport / other (기본값 personal)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;
use crate::domain::entities::Category;

/// `POST /api/v1/todo_items`
///
/// ```json
/// {
///   "title": "Отчёт",
///   "description": "квартальный",
///   "date_of_execution": "2025-03-01T09:00:00Z",
///   "category": "work"
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 100, message = "제목은 1-100자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(max = 500, message = "설명은 500자를 넘을 수 없습니다"))]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: bool,

    pub date_of_execution: Option<DateTime<Utc>>,

    #[serde(default)]
    pub category: Category,
}

/// `PATCH /api/v1/todo_items/{id}` - 전달된 필드만 변경합니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1, max = 100, message = "제목은 1-100자 사이여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "설명은 500자를 넘을 수 없습니다"))]
    pub description: Option<String>,

    pub completed: Option<bool>,

    pub date_of_execution: Option<DateTime<Utc>>,

    pub category: Option<Category>,
}

impl UpdateTodoRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.date_of_execution.is_none()
            && self.category.is_none()
    }
}

/// `GET /api/v1/admin/todo_items?user_id=`
#[derive(Debug, Deserialize, Validate)]
pub struct AdminTodoQuery {
    #[validate(length(min = 1, message = "user_id 가 필요합니다"))]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let request: CreateTodoRequest = serde_json::from_str(r#"{"title": "Купить хлеб"}"#).unwrap();
        assert_eq!(request.category, Category::Personal);
        assert!(!request.completed);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_title_and_description_limits() {
        let request = CreateTodoRequest {
            title: "t".repeat(101),
            description: Some("d".repeat(501)),
            completed: false,
            date_of_execution: None,
            category: Category::Other,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let parsed = serde_json::from_str::<CreateTodoRequest>(r#"{"title": "x", "category": "games"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_update_is_partial() {
        let update: UpdateTodoRequest = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        assert_eq!(update.completed, Some(true));
        assert!(update.title.is_none());
        assert!(!update.is_empty());
        assert!(UpdateTodoRequest::default().is_empty());
    }
}
