//! 인증 컨텍스트와 OAuth 교환에 쓰이는 도메인 모델

pub mod auth;
pub mod oauth;

pub use auth::*;
pub use oauth::*;
