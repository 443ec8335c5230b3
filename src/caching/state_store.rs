//! TTL 기반 키-값 상태 저장소 추상화

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use crate::core::errors::{AppResult, ErrorContext};

/// OAuth state 레코드 TTL (초)
pub const OAUTH_STATE_TTL_SECS: u64 = 300;

/// 이메일 확인 토큰 매핑 TTL (초, 12시간)
pub const EMAIL_CONFIRM_TTL_SECS: u64 = 43_200;

pub fn oauth_state_key(state: &str) -> String {
    format!("oauth_state:{}", state)
}

pub fn email_confirm_key(token: &str) -> String {
    format!("email_confirm:{}", token)
}

/// 만료 시간을 가진 키-값 저장소
///
/// - `put` 은 덮어쓰기를 허용합니다.
/// - `get` 은 TTL 을 연장하지 않습니다.
/// - `delete` 는 멱등입니다.
/// - `take` 는 조회와 삭제를 하나의 연산으로 수행합니다.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()>;

    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn delete(&self, key: &str) -> AppResult<()>;

    async fn take(&self, key: &str) -> AppResult<Option<String>>;
}

impl dyn StateStore {
    pub async fn put_json<T: Serialize + Sync>(&self, key: &str, value: &T, ttl_seconds: u64) -> AppResult<()> {
        let json = serde_json::to_string(value).context("state 직렬화 실패")?;
        self.put(key, &json, ttl_seconds).await
    }

    pub async fn take_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.take(key).await? {
            Some(json) => serde_json::from_str(&json).map(Some).context("state 역직렬화 실패"),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::caching::MemoryStateStore;
    use crate::core::errors::AppError;

    #[test]
    fn test_key_namespaces() {
        assert_eq!(oauth_state_key("abc"), "oauth_state:abc");
        assert_eq!(email_confirm_key("tok"), "email_confirm:tok");
    }

    #[actix_web::test]
    async fn test_take_json_reports_corrupt_record() {
        let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
        store.put("oauth_state:bad", "{not json", 60).await.unwrap();

        match store.take_json::<serde_json::Value>("oauth_state:bad").await {
            Err(AppError::InternalError(msg)) => assert!(msg.starts_with("state 역직렬화 실패: ")),
            other => panic!("expected InternalError, got {:?}", other),
        }
        assert!(store.get("oauth_state:bad").await.unwrap().is_none());
    }
}
