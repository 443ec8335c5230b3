//! 인증 서비스 모듈
//!
//! - [`token_service`] - JWT 발급/검증
//! - [`auth_service`] - 자격 증명 확인, 세션 토큰, OAuth 사용자 연결
//! - [`providers`] - Google / Yandex / VK 클라이언트
//! - [`oauth_flow`] - state 저장·검증을 포함한 공통 OAuth 로그인 흐름

pub mod token_service;
pub mod auth_service;
pub mod providers;
pub mod oauth_flow;

pub use token_service::*;
pub use auth_service::*;
pub use oauth_flow::*;
