pub mod users;
pub mod todos;

pub use users::user::User;
pub use todos::todo_item::{Category, TodoItem};
