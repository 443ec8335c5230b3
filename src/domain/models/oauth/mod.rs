//! OAuth 2.0 교환 모델
//!
//! - [`state`] - CSRF state 레코드와 PKCE 쌍 생성
//! - [`user_info`] - 프로바이더에서 받아온 사용자 정보

pub mod state;
pub mod user_info;

pub use state::{OAuthStateRecord, PkcePair};
pub use user_info::ProviderUserInfo;
