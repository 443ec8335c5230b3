//! 인-프로세스 `StateStore` 구현
//!
//! 단일 노드 개발 실행(`REDIS_URL=memory://`)과 테스트에서 사용합니다.
//! 만료는 읽기 시점에 판정하고, 만료된 항목은 다음 `put` 에서 한꺼번에 정리됩니다.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use crate::caching::state_store::StateStore;
use crate::core::errors::{AppError, AppResult};

#[derive(Default)]
pub struct MemoryStateStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut HashMap<String, (String, Instant)>) -> R) -> AppResult<R> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::RedisError("state store lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }

    fn live(entries: &mut HashMap<String, (String, Instant)>, key: &str) -> bool {
        match entries.get(key) {
            Some((_, expires_at)) if Instant::now() < *expires_at => true,
            Some(_) => {
                entries.remove(key);
                false
            }
            None => false,
        }
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()> {
        let now = Instant::now();
        let expires_at = now + Duration::from_secs(ttl_seconds);
        self.with_entries(|entries| {
            // 소비되지 않은 state 가 쌓이지 않도록
            entries.retain(|_, (_, exp)| *exp > now);
            entries.insert(key.to_string(), (value.to_string(), expires_at));
        })
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.with_entries(|entries| {
            if Self::live(entries, key) {
                entries.get(key).map(|(value, _)| value.clone())
            } else {
                None
            }
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        self.with_entries(|entries| {
            if Self::live(entries, key) {
                entries.remove(key).map(|(value, _)| value)
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_put_get_delete() {
        let store = MemoryStateStore::new();
        store.put("k", "v", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_put_overwrites() {
        let store = MemoryStateStore::new();
        store.put("k", "first", 60).await.unwrap();
        store.put("k", "second", 60).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[actix_web::test]
    async fn test_take_consumes_once() {
        let store = MemoryStateStore::new();
        store.put("k", "v", 60).await.unwrap();

        assert_eq!(store.take("k").await.unwrap().as_deref(), Some("v"));
        assert!(store.take("k").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_put_sweeps_expired_entries() {
        let store = MemoryStateStore::new();
        for i in 0..500 {
            store.put(&format!("abandoned:{}", i), "v", 0).await.unwrap();
        }
        store.put("live", "v", 60).await.unwrap();

        assert_eq!(store.entries.lock().unwrap().len(), 1);
        assert_eq!(store.get("live").await.unwrap().as_deref(), Some("v"));
    }

    #[actix_web::test]
    async fn test_zero_ttl_is_expired() {
        let store = MemoryStateStore::new();
        store.put("k", "v", 0).await.unwrap();

        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.take("k").await.unwrap().is_none());
    }
}
