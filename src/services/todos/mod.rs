//! 할 일 관리 서비스 모듈

pub mod todo_service;

pub use todo_service::TodoItemService;
