//! Task Pilot 백엔드
//!
//! 할 일 관리 서비스를 위한 인증 및 API 서버입니다.
//!
//! # Features
//!
//! - **로컬 인증**: 회원가입, 이메일 확인, 폼 로그인 (bcrypt)
//! - **OAuth 2.0**: Google, Yandex, VK ID (PKCE) 소셜 로그인
//! - **CSRF state**: TTL 이 있는 일회성 state 레코드 (Redis 또는 인-프로세스)
//! - **JWT 인증**: HMAC 서명 세션 토큰, 활성/관리자 권한 확인 미들웨어
//! - **할 일 관리**: 사용자별 CRUD 와 관리자 조회
//! - **MongoDB**: 사용자/할 일 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (/api/v1)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ AuthMiddleware  │ ← Bearer 토큰 / 활성 / 관리자
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (AppState 로 주입)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │  Repositories   │     │   StateStore    │
//! └─────────────────┘     └─────────────────┘
//!          │                       │
//!          ▼                       ▼
//!       MongoDB             Redis / memory
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use task_pilot_backend::core::{AppComponents, AppState};
//!
//! let state = AppState::new(AppComponents { /* ... */ });
//!
//! let user = state.users.register_user(request).await?;
//! let token = state.auth.issue_session_token(&user, 15)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
