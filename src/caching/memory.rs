//! 인메모리 만료 저장소
//!
//! 테스트와 로컬 실행용 [`ExpiringStore`] 구현입니다.
//! 하나의 `tokio::sync::Mutex` 아래에서 모든 연산을 수행하므로 키 단위 원자성은
//! Redis 구현과 같습니다.
//!
//! 만료는 두 가지 경로로 처리됩니다.
//! - 읽기/쓰기 시점에 만료된 항목은 없는 것으로 취급 (지연 만료)
//! - [`MemoryStore::spawn_reaper`]가 주기적으로 만료 항목을 정리
//!
//! 시각은 `tokio::time::Instant`를 사용하므로 일시정지된 테스트 시계로 TTL을 검증할 수 있습니다.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::store::{ensure_ttl, ExpiringStore, SwapOutcome};
use crate::errors::AppResult;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn new(value: &str, ttl_seconds: u64) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

type Entries = HashMap<String, Entry>;

#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Entries>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 살아 있는 항목 수
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries.values().filter(|entry| entry.is_live(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// 백그라운드 정리 작업을 시작합니다.
    ///
    /// 작업은 저장소에 대한 약한 참조만 들고 있으므로 마지막 `MemoryStore`가
    /// drop 되면 스스로 종료됩니다.
    pub fn spawn_reaper(&self, every: Duration) -> JoinHandle<()> {
        let entries: Weak<Mutex<Entries>> = Arc::downgrade(&self.entries);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(entries) = entries.upgrade() else {
                    break;
                };
                let removed = purge(&entries).await;
                if removed > 0 {
                    log::debug!("만료된 저장소 항목 {}개 정리", removed);
                }
            }
        })
    }

    /// 만료 여부를 반영해 현재 값을 꺼냅니다. 만료된 항목은 그 자리에서 지웁니다.
    fn live_value<'a>(entries: &'a mut Entries, key: &str, now: Instant) -> Option<&'a mut Entry> {
        let expired = matches!(entries.get(key), Some(entry) if !entry.is_live(now));
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get_mut(key)
    }
}

async fn purge(entries: &Mutex<Entries>) -> usize {
    let now = Instant::now();
    let mut entries = entries.lock().await;
    let before = entries.len();
    entries.retain(|_, entry| entry.is_live(now));
    before - entries.len()
}

#[async_trait]
impl ExpiringStore for MemoryStore {
    async fn put_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<bool> {
        ensure_ttl(ttl_seconds)?;
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        if Self::live_value(&mut entries, key, now).is_some() {
            return Ok(false);
        }
        entries.insert(key.to_string(), Entry::new(value, ttl_seconds));
        Ok(true)
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()> {
        ensure_ttl(ttl_seconds)?;
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), Entry::new(value, ttl_seconds));
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        Ok(Self::live_value(&mut entries, key, now).map(|entry| entry.value.clone()))
    }

    async fn get_and_delete(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        Ok(entries
            .remove(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value))
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: &str,
        replacement: &str,
        ttl_seconds: u64,
    ) -> AppResult<SwapOutcome> {
        ensure_ttl(ttl_seconds)?;
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        match Self::live_value(&mut entries, key, now) {
            None => Ok(SwapOutcome::Missing),
            Some(entry) if entry.value != expected => Ok(SwapOutcome::Mismatch),
            Some(entry) => {
                *entry = Entry::new(replacement, ttl_seconds);
                Ok(SwapOutcome::Swapped)
            }
        }
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        Ok(entries
            .remove(key)
            .is_some_and(|entry| entry.is_live(now)))
    }
}
