//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 핸들러는 입력 검증과 응답 변환만
//! 담당하고 비즈니스 로직은 [`AppState`](crate::core::AppState) 의 서비스에 위임합니다.
//!
//! ```text
//! Client
//!   │ HTTP Request/Response
//!   ▼
//! AuthMiddleware (보호된 스코프)   ← 토큰 / 활성 / 관리자 확인
//!   ▼
//! Handlers (이 모듈)              ← Web Layer
//!   ▼
//! Services                        ← Service Layer
//!   ▼
//! Repositories / StateStore       ← MongoDB, Redis
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 로컬 로그인, OAuth 로그인/콜백, 이메일 확인
//! - **`users`**: 회원가입, 현재 사용자 조회
//! - **`todo_items`**: 할 일 CRUD
//! - **`admin`**: 관리자용 할 일 조회
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>` 를 반환하고, `AppError` 는
//! `{"error": code, "message": text}` JSON 으로 변환됩니다.
//!
//! ```rust,ignore
//! #[post("/register")]
//! pub async fn register(
//!     state: web::Data<AppState>,
//!     payload: web::Json<CreateUserRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;              // 422
//!     state.users.register_user(payload.into_inner()).await?;   // 409, 500
//!     Ok(HttpResponse::Created().json(MessageResponse::new("...")))
//! }
//! ```

pub mod auth;
pub mod users;
pub mod todo_items;
pub mod admin;
