//! 할 일 데이터 액세스 계층

pub mod todo_repo;

pub use todo_repo::{TodoRepository, TodoStore};
