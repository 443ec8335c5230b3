//! # Domain Layer Module
//!
//! 비즈니스 객체와 API 계약을 정의하는 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - MongoDB 에 저장되는 핵심 객체 (User, TodoItem)
//! ├── DTOs      - HTTP 요청/응답 계약
//! └── Models    - 인증 컨텍스트, OAuth state 레코드, 비밀번호 값 객체
//! ```
//!
//! | Spring | 이 시스템 | 역할 |
//! |--------|-----------|------|
//! | `@Entity` | `entities` 모듈 | 영속 객체 |
//! | `@RequestBody` / `@ResponseBody` | `dto` 모듈 | API 계약 정의 |
//! | `@Valid` | `validator` derive | 입력 검증 |

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
