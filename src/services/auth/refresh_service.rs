//! 토큰 갱신(회전) 서비스
//!
//! 만료된 액세스 토큰과 리프레시 토큰을 함께 받아 새 토큰 쌍으로 교체합니다.
//!
//! 1. 액세스 토큰 서명 확인 (만료 무시)
//! 2. 아직 만료되지 않았으면 `NotExpiredToken`
//! 3. 저장된 리프레시 토큰 조회, 없으면 `InvalidToken`
//! 4. 제출된 값과 상수 시간 비교, 다르면 `UnauthorizedAccess`
//! 5. 새 값으로 CAS 교체. 그사이 다른 요청이 먼저 교체했으면 `UnauthorizedAccess`
//!
//! 어느 단계에서 실패해도 저장소는 바뀌지 않습니다.

use std::sync::Arc;

use chrono::Utc;
use constant_time_eq::constant_time_eq;

use super::token_service::{ExpiryPolicy, TokenService};
use crate::caching::SwapOutcome;
use crate::domain::dto::AuthResult;
use crate::domain::entities::RefreshToken;
use crate::domain::models::token::IssuedToken;
use crate::errors::{AppResult, AuthError};
use crate::repositories::RefreshTokenRepository;

pub struct RefreshService {
    token_service: Arc<TokenService>,
    refresh_tokens: Arc<RefreshTokenRepository>,
}

impl RefreshService {
    pub fn new(token_service: Arc<TokenService>, refresh_tokens: Arc<RefreshTokenRepository>) -> Self {
        Self {
            token_service,
            refresh_tokens,
        }
    }

    pub async fn refresh(&self, access_token: &str, refresh_token: &str) -> AppResult<AuthResult> {
        let claims = self
            .token_service
            .decode_access_token(access_token, ExpiryPolicy::Ignore)?;

        if !claims.is_expired_at(Utc::now().timestamp()) {
            log::warn!("만료 전 토큰 갱신 시도: member_id={}", claims.member_id);
            return Err(AuthError::NotExpiredToken.into());
        }

        let member_id = claims.member_id;
        let stored = self
            .refresh_tokens
            .find(member_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !constant_time_eq(stored.token.value.as_bytes(), refresh_token.as_bytes()) {
            log::warn!("⚠️ 리프레시 토큰 불일치 (재사용 의심): member_id={}", member_id);
            return Err(AuthError::UnauthorizedAccess.into());
        }

        let access = self.token_service.issue_access_token(member_id)?;
        let replacement = RefreshToken::issue(member_id);

        match self
            .refresh_tokens
            .rotate(&stored, &replacement, self.token_service.refresh_token_store_ttl())
            .await?
        {
            SwapOutcome::Swapped => {
                log::info!("🔄 토큰 회전 완료: member_id={}", member_id);
                let refresh = IssuedToken {
                    token: replacement.value,
                    expires_in: self.token_service.refresh_token_ttl(),
                };
                Ok(AuthResult::bearer(access, refresh))
            }
            SwapOutcome::Mismatch => {
                log::warn!("⚠️ 동시 갱신 경합에서 패배: member_id={}", member_id);
                Err(AuthError::UnauthorizedAccess.into())
            }
            SwapOutcome::Missing => Err(AuthError::InvalidToken.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::MemoryStore;
    use crate::config::TokenSettings;

    struct Fixture {
        refresh: RefreshService,
        tokens: Arc<TokenService>,
        repo: Arc<RefreshTokenRepository>,
    }

    /// 액세스 토큰 TTL 0초: 발급 즉시 만료되어 바로 갱신할 수 있습니다.
    fn fixture(access_ttl: i64) -> Fixture {
        let repo = Arc::new(RefreshTokenRepository::new(Arc::new(MemoryStore::new())));
        let tokens = Arc::new(TokenService::new(
            TokenSettings {
                secret: "refresh-test-secret".to_string(),
                access_token_ttl_seconds: access_ttl,
                refresh_token_ttl_seconds: 1_209_600,
            },
            repo.clone(),
        ));
        Fixture {
            refresh: RefreshService::new(tokens.clone(), repo.clone()),
            tokens,
            repo,
        }
    }

    fn kind(result: AppResult<AuthResult>) -> Option<AuthError> {
        result.unwrap_err().auth_kind()
    }

    #[tokio::test]
    async fn test_unexpired_access_token_is_rejected() {
        let fx = fixture(3_600);
        let session = fx.tokens.issue_pair(42).await.unwrap();

        let result = fx.refresh.refresh(&session.access_token, &session.refresh_token).await;
        assert_eq!(kind(result), Some(AuthError::NotExpiredToken));

        let stored = fx.repo.find(42).await.unwrap().unwrap();
        assert_eq!(stored.token.value, session.refresh_token);
    }

    #[tokio::test]
    async fn test_rotation_issues_new_pair() {
        let fx = fixture(0);
        let session = fx.tokens.issue_pair(42).await.unwrap();

        let rotated = fx
            .refresh
            .refresh(&session.access_token, &session.refresh_token)
            .await
            .unwrap();

        assert_ne!(rotated.refresh_token, session.refresh_token);
        assert_eq!(rotated.refresh_token_expires_in, 1_209_600);
        let claims = fx
            .tokens
            .decode_access_token(&rotated.access_token, ExpiryPolicy::Ignore)
            .unwrap();
        assert_eq!(claims.member_id, 42);
        assert_eq!(fx.repo.find(42).await.unwrap().unwrap().token.value, rotated.refresh_token);
    }

    #[tokio::test]
    async fn test_old_refresh_value_is_unauthorized_after_rotation() {
        let fx = fixture(0);
        let session = fx.tokens.issue_pair(42).await.unwrap();
        let rotated = fx
            .refresh
            .refresh(&session.access_token, &session.refresh_token)
            .await
            .unwrap();

        let replay = fx.refresh.refresh(&rotated.access_token, &session.refresh_token).await;
        assert_eq!(kind(replay), Some(AuthError::UnauthorizedAccess));

        assert!(fx.refresh.refresh(&rotated.access_token, &rotated.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_refresh_token_is_invalid() {
        let fx = fixture(0);
        let session = fx.tokens.issue_pair(42).await.unwrap();
        fx.tokens.revoke_refresh_token(42).await.unwrap();

        let result = fx.refresh.refresh(&session.access_token, &session.refresh_token).await;
        assert_eq!(kind(result), Some(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_tampered_access_token() {
        let fx = fixture(0);
        let session = fx.tokens.issue_pair(42).await.unwrap();

        let mut tampered = session.access_token.clone();
        tampered.push('x');
        let result = fx.refresh.refresh(&tampered, &session.refresh_token).await;
        assert_eq!(kind(result), Some(AuthError::InvalidTokenSignature));

        let result = fx.refresh.refresh("garbage", &session.refresh_token).await;
        assert_eq!(kind(result), Some(AuthError::MalformedToken));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_refresh_single_winner() {
        let fx = Arc::new(fixture(0));
        let session = fx.tokens.issue_pair(42).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let fx = Arc::clone(&fx);
                let access = session.access_token.clone();
                let refresh = session.refresh_token.clone();
                tokio::spawn(async move { fx.refresh.refresh(&access, &refresh).await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(err) => assert_eq!(err.auth_kind(), Some(AuthError::UnauthorizedAccess)),
            }
        }
        assert_eq!(winners, 1);
    }
}
