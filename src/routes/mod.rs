//! API 라우트 설정 모듈
//!
//! 모든 API 는 `/api/v1` 아래에 있고, 루트에는 앱 정보와 헬스체크가 있습니다.
//!
//! | 경로 | 접근 |
//! |------|------|
//! | `POST /auth/login`, `GET /auth/login/{provider}[/callback]`, `GET /auth/confirm-email` | 공개 |
//! | `POST /user/register` | 공개 |
//! | `GET /user/me` | 활성 사용자 |
//! | `/todo_items/*` | 활성 사용자 |
//! | `GET /admin/todo_items` | 관리자 |
//!
//! 요청 본문/쿼리 파싱 실패는 `422 validation_error` 로 응답합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(state))
//!     .configure(configure_all_routes);
//! ```

use crate::core::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::{get, web, HttpResponse};
use serde_json::json;

pub const API_PREFIX: &str = "/api/v1";

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    cfg.service(app_info);
    cfg.service(health_check);

    cfg.service(
        web::scope(API_PREFIX)
            .configure(configure_auth_routes)
            .configure(configure_user_routes)
            .configure(configure_todo_routes)
            .configure(configure_admin_routes),
    );
}

/// 추출기 에러를 `AppError::ValidationError` 로 통일합니다.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    );
}

/// 인증 관련 라우트 (모두 공개)
///
/// ```bash
/// # 로컬 로그인 (토큰 60분)
/// curl -X POST "http://localhost:8000/api/v1/auth/login?minutes=60" \
///   -d "username=alice&password=password123"
///
/// # Google 로그인 시작 (307)
/// curl -i http://localhost:8000/api/v1/auth/login/google
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::local_login)
            .service(handlers::auth::confirm_email)
            .service(handlers::auth::oauth_callback)
            .service(handlers::auth::oauth_login),
    );
}

/// 사용자 라우트
///
/// 회원가입은 공개, `/me` 는 인증이 필요합니다.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(handlers::users::register)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::users::get_current_user),
            ),
    );
}

/// 할 일 라우트 (인증 필요)
///
/// `/all` 은 `/{id}` 보다 먼저 등록되어야 합니다.
fn configure_todo_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/todo_items")
            .wrap(AuthMiddleware::required())
            .service(handlers::todo_items::list_todo_items)
            .service(handlers::todo_items::create_todo_item)
            .service(handlers::todo_items::get_todo_item)
            .service(handlers::todo_items::update_todo_item)
            .service(handlers::todo_items::delete_todo_item),
    );
}

/// 관리자 라우트
fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AuthMiddleware::admin())
            .service(handlers::admin::list_user_todo_items),
    );
}

/// 앱 정보
#[get("/")]
async fn app_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Добро пожаловать в приложение",
        "app_name": "Task Pilot",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "task_pilot",
///   "version": "0.1.0",
///   "timestamp": "2025-01-01T00:00:00Z"
/// }
/// ```
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "task_pilot",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
