//! Redis 기반 `StateStore` 구현
//!
//! `connection-manager` 기능의 [`ConnectionManager`] 하나를 복제해 사용하므로
//! 요청마다 새 TCP 연결을 만들지 않습니다. 연결이 끊기면 자동으로 재연결됩니다.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use crate::caching::state_store::StateStore;
use crate::core::errors::AppResult;

#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
}

impl RedisClient {
    /// Redis 에 연결하고 PING 으로 연결을 확인합니다.
    ///
    /// # Errors
    ///
    /// * URL 파싱 실패, 연결 실패, PING 실패 시 `redis::RedisError`
    pub async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        let mut conn = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        log::info!("✅ Redis 연결 성공");

        Ok(Self { conn })
    }
}

#[async_trait]
impl StateStore for RedisClient {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get_del(key).await?)
    }
}
