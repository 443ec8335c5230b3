//! 미들웨어 모듈
//!
//! 인증이 필요한 스코프에 [`AuthMiddleware`] 를 적용합니다.
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! cfg.service(
//!     web::scope("/todo_items")
//!         .wrap(AuthMiddleware::required())   // 활성 사용자
//!         .service(handlers::todo_items::list_todo_items)
//! );
//!
//! cfg.service(
//!     web::scope("/admin")
//!         .wrap(AuthMiddleware::admin())      // 관리자
//!         .service(handlers::admin::list_user_todo_items)
//! );
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::{AccessLevel, AuthMiddleware};
