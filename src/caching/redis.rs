//! # Redis 만료 저장소 구현
//!
//! [`ExpiringStore`]의 운영 환경 구현입니다.
//! 모든 연산은 단일 Redis 명령(또는 단일 Lua 스크립트)이므로 키 단위로 원자적입니다.
//!
//! 연결은 `ConnectionManager`로 관리되어 끊어지면 자동 재연결되며,
//! 복제 비용이 낮아 요청마다 핸들을 복사해 사용합니다.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Script};
use std::env;

use super::store::{ensure_ttl, ExpiringStore, SwapOutcome};
use crate::errors::AppResult;

/// 값이 기대와 같을 때만 교체하는 CAS 스크립트
///
/// 반환값: 1 = 교체, 0 = 불일치, -1 = 키 없음
const COMPARE_AND_SWAP_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if not current then
    return -1
end
if current ~= ARGV[1] then
    return 0
end
redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
return 1
"#;

#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
    swap_script: Script,
}

impl RedisClient {
    /// `REDIS_URL` 환경 변수로 연결합니다.
    pub async fn new() -> AppResult<Self> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        Self::connect(&redis_url).await
    }

    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = Client::open(redis_url)?;
        let mut connection = ConnectionManager::new(client).await?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        redis::cmd("PING").query_async::<()>(&mut connection).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self {
            connection,
            swap_script: Script::new(COMPARE_AND_SWAP_SCRIPT),
        })
    }
}

#[async_trait]
impl ExpiringStore for RedisClient {
    async fn put_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<bool> {
        ensure_ttl(ttl_seconds)?;
        let mut conn = self.connection.clone();

        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await?;

        Ok(reply.is_some())
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()> {
        ensure_ttl(ttl_seconds)?;
        let mut conn = self.connection.clone();
        let _: () = conn.set_ex(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn get_and_delete(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get_del(key).await?;
        Ok(value)
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        replacement: &str,
        ttl_seconds: u64,
    ) -> AppResult<SwapOutcome> {
        ensure_ttl(ttl_seconds)?;
        let mut conn = self.connection.clone();

        let result: i64 = self
            .swap_script
            .key(key)
            .arg(expected)
            .arg(replacement)
            .arg(ttl_seconds)
            .invoke_async(&mut conn)
            .await?;

        Ok(match result {
            1 => SwapOutcome::Swapped,
            0 => SwapOutcome::Mismatch,
            _ => SwapOutcome::Missing,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }
}
