//! 단기 상태 저장 계층 모듈
//!
//! OAuth CSRF state 레코드와 이메일 확인 토큰처럼 수명이 짧은 값을
//! TTL 과 함께 보관합니다.
//!
//! # 구성
//!
//! - [`state_store`] - `StateStore` 트레이트, 키 네임스페이스, TTL 상수
//! - [`redis`] - Redis 기반 구현 (`SET EX`, `GETDEL`)
//! - [`memory`] - 단일 노드 개발/테스트용 인-프로세스 구현
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::{RedisClient, StateStore, oauth_state_key, OAUTH_STATE_TTL_SECS};
//!
//! let store: Arc<dyn StateStore> = Arc::new(RedisClient::connect(&url).await?);
//! store.put(&oauth_state_key(&state), &json, OAUTH_STATE_TTL_SECS).await?;
//! let record = store.take(&oauth_state_key(&state)).await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! REDIS_URL=memory://               # 인-프로세스 저장소
//! ```

pub mod redis;
pub mod memory;
pub mod state_store;

pub use self::memory::MemoryStateStore;
pub use self::redis::RedisClient;
pub use self::state_store::*;
