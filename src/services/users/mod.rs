//! 사용자 관리 서비스 모듈
//!
//! 회원가입, 이메일 확인, 사용자 조회를 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user = user_service.register_user(request).await?;
//! let confirmed = user_service.confirm_email(&token).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
