//! # Service Layer
//!
//! 비즈니스 로직 계층입니다. 모든 서비스는 애플리케이션 시작 시 한 번 생성되어
//! [`AppState`](crate::core::app_state::AppState) 를 통해 핸들러에 주입됩니다.
//!
//! - [`auth`] - 토큰, 자격 증명, OAuth 프로바이더와 로그인 흐름
//! - [`users`] - 회원가입과 이메일 확인
//! - [`todos`] - 할 일 CRUD
//! - [`email`] - 확인 메일 발송

pub mod auth;
pub mod users;
pub mod todos;
pub mod email;
