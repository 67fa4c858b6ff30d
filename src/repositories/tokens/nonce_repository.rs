use std::sync::Arc;

use crate::caching::ExpiringStore;
use crate::domain::entities::Nonce;
use crate::errors::{AppError, AppResult};

/// 논스 저장소
///
/// 발급은 조건부 생성, 소비는 원자적 읽기-삭제입니다.
/// 같은 논스를 동시에 소비하려는 요청 중 하나만 값을 받습니다.
pub struct NonceRepository {
    store: Arc<dyn ExpiringStore>,
}

impl NonceRepository {
    pub fn new(store: Arc<dyn ExpiringStore>) -> Self {
        Self { store }
    }

    /// 같은 값이 살아 있지 않을 때만 저장합니다. 저장했으면 `true`.
    pub async fn create(&self, nonce: &Nonce, ttl_seconds: u64) -> AppResult<bool> {
        let record = nonce
            .to_record()
            .map_err(|e| AppError::InternalError(format!("논스 직렬화 실패: {}", e)))?;

        self.store.put_if_absent(&nonce.key(), &record, ttl_seconds).await
    }

    /// 논스를 꺼내면서 삭제합니다. 없거나 만료됐으면 `None`.
    pub async fn take(&self, value: &str) -> AppResult<Option<Nonce>> {
        let Some(record) = self.store.get_and_delete(&Nonce::storage_key(value)).await? else {
            return Ok(None);
        };

        Nonce::from_record(value, &record)
            .map(Some)
            .map_err(|e| AppError::StoreError(format!("손상된 논스 레코드: {}", e)))
    }
}
