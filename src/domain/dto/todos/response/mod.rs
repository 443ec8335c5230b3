pub mod todo_response;

pub use todo_response::TodoItemResponse;
