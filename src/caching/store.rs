//! 만료 키-값 저장소 추상화
//!
//! 논스와 리프레시 토큰은 모두 "키 하나 단위의 원자적 연산 + TTL"만으로 조율됩니다.
//! 서비스 계층은 이 trait만 알고, 실제 구현은 Redis([`super::redis::RedisClient`])
//! 또는 인메모리 맵([`super::memory::MemoryStore`])이 담당합니다.
//!
//! | 연산 | 용도 | Redis |
//! |------|------|-------|
//! | `put_if_absent` | 논스 발급 | `SET NX EX` |
//! | `get_and_delete` | 논스 소비 | `GETDEL` |
//! | `put` | 로그인 시 리프레시 토큰 덮어쓰기 | `SET EX` |
//! | `compare_and_swap` | 리프레시 토큰 회전 | Lua 스크립트 |

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

/// `compare_and_swap` 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// 기대값과 일치하여 교체됨
    Swapped,
    /// 키는 있지만 값이 기대와 다름 (다른 요청이 먼저 교체함)
    Mismatch,
    /// 키가 없음 (만료 또는 삭제됨)
    Missing,
}

#[async_trait]
pub trait ExpiringStore: Send + Sync {
    /// 키가 없을 때만 저장합니다. 저장했으면 `true`.
    async fn put_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<bool>;

    /// 기존 값과 TTL을 덮어씁니다.
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()>;

    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 값을 읽고 같은 연산 안에서 삭제합니다. 동시 호출 중 하나만 값을 받습니다.
    async fn get_and_delete(&self, key: &str) -> AppResult<Option<String>>;

    /// 현재 값이 `expected`와 같을 때만 `replacement`로 교체하고 TTL을 재설정합니다.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        replacement: &str,
        ttl_seconds: u64,
    ) -> AppResult<SwapOutcome>;

    /// 키를 삭제합니다. 실제로 삭제된 값이 있었으면 `true`.
    async fn delete(&self, key: &str) -> AppResult<bool>;
}

/// 0초 TTL은 Redis에서 오류이므로 모든 구현이 같은 규칙으로 거부합니다.
pub(crate) fn ensure_ttl(ttl_seconds: u64) -> AppResult<()> {
    if ttl_seconds == 0 {
        return Err(AppError::StoreError("TTL must be greater than zero".to_string()));
    }
    Ok(())
}
