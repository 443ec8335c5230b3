//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 요청/응답 계약을 정의합니다. 요청 DTO 는 `validator` derive 로
//! 필드 제약을 선언하고, 핸들러에서 `validate()` 로 검사합니다.

pub mod users;
pub mod todos;

pub use users::*;
pub use todos::*;
