//! 인증 요청관련 DTO
//!
//! 로그인 폼, OAuth 콜백, 이메일 확인 요청의 파라미터를 매핑합니다.

use serde::Deserialize;
use validator::Validate;
use crate::domain::models::auth::Password;

/// 기본 세션 토큰 수명 (분)
pub const DEFAULT_TOKEN_MINUTES: i64 = 15;

/// 폼 로그인 요청 (`application/x-www-form-urlencoded`)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: Password,
}

/// 로그인 쿼리 파라미터: 발급할 토큰의 수명 (1-2880분)
#[derive(Debug, Deserialize, Validate)]
pub struct LoginQuery {
    #[validate(range(min = 1, max = 2880, message = "minutes 는 1-2880 사이여야 합니다"))]
    #[serde(default = "default_minutes")]
    pub minutes: i64,
}

fn default_minutes() -> i64 {
    DEFAULT_TOKEN_MINUTES
}

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 동의를 거부하면 `code` 대신 `error` 가 전달됩니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// VK ID 가 전달하는 기기 식별자
    pub device_id: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmEmailQuery {
    #[validate(length(min = 1, message = "토큰이 필요합니다"))]
    pub token: String,
}
