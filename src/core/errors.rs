//! # 애플리케이션 에러 처리 모듈
//!
//! 모든 계층에서 공통으로 사용하는 [`AppError`] 타입을 정의합니다.
//! Spring의 `@ControllerAdvice` + `@ExceptionHandler` 조합과 같은 역할로,
//! `actix_web::ResponseError` 구현을 통해 HTTP 응답으로 자동 변환됩니다.
//!
//! ## 상태 코드 매핑
//!
//! | 변형 | HTTP | `error` 코드 |
//! |------|------|--------------|
//! | `AuthenticationError` | 401 | `unauthenticated` |
//! | `InactiveAccount` | 400 | `inactive_account` |
//! | `AuthorizationError` | 403 | `forbidden` |
//! | `NotFound` | 404 | `not_found` |
//! | `ValidationError` | 422 | `validation_error` |
//! | `BadRequest` | 400 | `bad_request` |
//! | `OAuthState` | 400 | `invalid_state` |
//! | `ConflictError` | 409 | `conflict` |
//! | `UpstreamAuthError` | 프로바이더 결과에 따름 | `upstream_auth_error` |
//! | `DatabaseError` / `RedisError` / `InternalError` | 500 | `internal_error` |
//!
//! 500 계열 에러는 내부 메시지를 로그로만 남기고 응답 본문에는 일반 문구만 담습니다.
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "invalid_state", "message": "State не найден или истёк" }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// OAuth CSRF state 검증 실패 사유
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// 저장소에 state 가 없음 (만료, 재사용 또는 위조)
    #[error("State не найден или истёк")]
    NotFoundOrExpired,

    /// 저장된 state 와 콜백의 state 불일치
    #[error("Неверный state")]
    Mismatch,

    /// 생성 후 허용 시간(300초) 초과
    #[error("State истёк")]
    ExpiredByAge,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 이메일 확인 전 계정
    #[error("Inactive account")]
    InactiveAccount,

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    #[error("OAuth state error: {0}")]
    OAuthState(#[from] StateError),

    /// 외부 OAuth 프로바이더와의 교환 실패
    #[error("Upstream auth error ({status}): {message}")]
    UpstreamAuthError { status: u16, message: String },

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        AppError::UpstreamAuthError {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) | AppError::InactiveAccount | AppError::OAuthState(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::UpstreamAuthError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::AuthenticationError(_) => "unauthenticated",
            AppError::InactiveAccount => "inactive_account",
            AppError::AuthorizationError(_) => "forbidden",
            AppError::OAuthState(_) => "invalid_state",
            AppError::UpstreamAuthError { .. } => "upstream_auth_error",
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                "internal_error"
            }
        }
    }

    /// 클라이언트에 노출되는 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg) => msg.clone(),
            AppError::InactiveAccount => "Inactive user".to_string(),
            AppError::OAuthState(e) => e.to_string(),
            AppError::UpstreamAuthError { message, .. } => message.clone(),
            AppError::DatabaseError(_) | AppError::RedisError(_) => "storage failure".to_string(),
            AppError::InternalError(_) => "internal server error".to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status();

        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.code(),
                "message": self.public_message()
            }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 임의의 에러에 문맥을 붙여 `InternalError` 로 변환하는 확장 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
