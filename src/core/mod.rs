//! # Core Module
//!
//! - [`errors`] - 애플리케이션 전역 에러 타입과 HTTP 응답 변환
//! - [`app_state`] - 핸들러에 주입되는 서비스 묶음
//!
//! ```rust,ignore
//! let state = AppState::new(AppComponents { /* 저장소, 토큰, 메일, 프로바이더 */ });
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::new(state.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod errors;
pub mod app_state;

pub use errors::*;
pub use app_state::{AppComponents, AppState};
