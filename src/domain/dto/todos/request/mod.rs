pub mod todo_request;

pub use todo_request::{AdminTodoQuery, CreateTodoRequest, UpdateTodoRequest};
