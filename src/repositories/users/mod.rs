//! 사용자 데이터 액세스 계층
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(&database).await?);
//! let user = users.find_by_email("user@example.com", false).await?;
//! ```

pub mod user_repo;

pub use user_repo::{UserRepository, UserStore, UserUpdate};
