use std::sync::Arc;

use crate::caching::{ExpiringStore, SwapOutcome};
use crate::domain::entities::RefreshToken;
use crate::errors::{AppError, AppResult};

/// 저장소에서 읽어 온 리프레시 토큰
///
/// 회전 시 CAS 기대값으로 쓰기 위해 저장된 원문을 함께 보관합니다.
#[derive(Debug, Clone)]
pub struct StoredRefreshToken {
    pub token: RefreshToken,
    raw: String,
}

/// 회원별 리프레시 토큰 저장소 (`refreshToken:{memberId}`)
pub struct RefreshTokenRepository {
    store: Arc<dyn ExpiringStore>,
}

impl RefreshTokenRepository {
    pub fn new(store: Arc<dyn ExpiringStore>) -> Self {
        Self { store }
    }

    fn serialize(token: &RefreshToken) -> AppResult<String> {
        serde_json::to_string(token)
            .map_err(|e| AppError::InternalError(format!("리프레시 토큰 직렬화 실패: {}", e)))
    }

    /// 기존 토큰을 덮어쓰고 TTL을 새로 시작합니다.
    pub async fn save(&self, token: &RefreshToken, ttl_seconds: u64) -> AppResult<()> {
        let record = Self::serialize(token)?;
        self.store.put(&token.key(), &record, ttl_seconds).await
    }

    pub async fn find(&self, member_id: i64) -> AppResult<Option<StoredRefreshToken>> {
        let Some(raw) = self.store.get(&RefreshToken::storage_key(member_id)).await? else {
            return Ok(None);
        };

        let token: RefreshToken = serde_json::from_str(&raw)
            .map_err(|e| AppError::StoreError(format!("손상된 리프레시 토큰 레코드: {}", e)))?;

        Ok(Some(StoredRefreshToken { token, raw }))
    }

    /// 저장된 레코드가 `current`와 같을 때만 `replacement`로 교체합니다.
    pub async fn rotate(
        &self,
        current: &StoredRefreshToken,
        replacement: &RefreshToken,
        ttl_seconds: u64,
    ) -> AppResult<SwapOutcome> {
        let record = Self::serialize(replacement)?;
        self.store
            .compare_and_swap(&current.token.key(), &current.raw, &record, ttl_seconds)
            .await
    }

    /// 회원의 리프레시 토큰을 삭제합니다. 실제로 삭제됐으면 `true`.
    pub async fn delete(&self, member_id: i64) -> AppResult<bool> {
        self.store.delete(&RefreshToken::storage_key(member_id)).await
    }
}
