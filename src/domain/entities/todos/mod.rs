//! Todo Items Entity Module

pub mod todo_item;
