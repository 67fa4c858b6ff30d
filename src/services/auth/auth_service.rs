//! 로그인 오케스트레이션
//!
//! 프로바이더 ID 토큰 검증 → 논스 소비 및 프로바이더 일치 확인 → 회원 조회/생성 → 토큰 쌍 발급.
//!
//! 논스는 토큰 검증이 끝난 뒤에만 소비합니다. 위조되거나 만료된 토큰으로는
//! 정상 사용자의 논스를 태워 없앨 수 없습니다.

use std::sync::Arc;

use super::nonce_service::NonceService;
use super::provider_verifier::ProviderVerifier;
use super::token_service::TokenService;
use crate::config::AuthProvider;
use crate::domain::dto::AuthResult;
use crate::errors::{AppResult, AuthError};
use crate::repositories::MemberResolver;

pub struct AuthService {
    verifier: Arc<ProviderVerifier>,
    nonce_service: Arc<NonceService>,
    members: Arc<dyn MemberResolver>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        verifier: Arc<ProviderVerifier>,
        nonce_service: Arc<NonceService>,
        members: Arc<dyn MemberResolver>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            verifier,
            nonce_service,
            members,
            token_service,
        }
    }

    pub async fn sign_in(&self, provider: AuthProvider, signed_assertion: &str) -> AppResult<AuthResult> {
        let identity = self.verifier.verify(provider, signed_assertion).await?;

        let nonce_provider = self.nonce_service.consume(&identity.nonce).await?;
        if nonce_provider != provider {
            log::warn!(
                "논스 프로바이더 불일치: 요청={}, 발급={}",
                provider,
                nonce_provider
            );
            return Err(AuthError::InvalidNonce.into());
        }

        let member_id = self
            .members
            .resolve(provider, &identity.provider_user_id)
            .await?;

        log::info!("🔑 로그인 성공: provider={}, member_id={}", provider, member_id);
        self.token_service.issue_pair(member_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::MemoryStore;
    use crate::config::{TokenSettings, VerifierSettings};
    use crate::repositories::{MemoryMemberDirectory, NonceRepository, RefreshTokenRepository};
    use crate::services::auth::public_keys::StaticPublicKeySource;
    use crate::services::auth::test_keys::ProviderSigner;
    use crate::services::auth::token_service::ExpiryPolicy;
    use chrono::Utc;
    use serde_json::json;

    struct Fixture {
        auth: AuthService,
        nonces: Arc<NonceService>,
        tokens: Arc<TokenService>,
        signer: ProviderSigner,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let signer = ProviderSigner::primary();
        let source = StaticPublicKeySource::new()
            .with_keys(AuthProvider::Kakao, signer.key_set())
            .with_keys(AuthProvider::Apple, signer.key_set());

        let nonces = Arc::new(NonceService::new(Arc::new(NonceRepository::new(store.clone())), 300));
        let tokens = Arc::new(TokenService::new(
            TokenSettings {
                secret: "sign-in-secret".to_string(),
                access_token_ttl_seconds: 3_600,
                refresh_token_ttl_seconds: 1_209_600,
            },
            Arc::new(RefreshTokenRepository::new(store)),
        ));
        let verifier = Arc::new(ProviderVerifier::new(Arc::new(source), VerifierSettings::default()));
        let auth = AuthService::new(
            verifier,
            nonces.clone(),
            Arc::new(MemoryMemberDirectory::starting_at(42)),
            tokens.clone(),
        );

        Fixture { auth, nonces, tokens, signer }
    }

    fn assertion(signer: &ProviderSigner, sub: &str, nonce: &str) -> String {
        let now = Utc::now().timestamp();
        signer.sign(&json!({ "sub": sub, "nonce": nonce, "iat": now, "exp": now + 600 }))
    }

    #[tokio::test]
    async fn test_sign_in_issues_session_for_member() {
        let fx = fixture();
        let nonce = fx.nonces.issue("kakao").await.unwrap();

        let result = fx
            .auth
            .sign_in(AuthProvider::Kakao, &assertion(&fx.signer, "999", &nonce.value))
            .await
            .unwrap();

        let claims = fx
            .tokens
            .decode_access_token(&result.access_token, ExpiryPolicy::Enforce)
            .unwrap();
        assert_eq!(claims.member_id, 42);
        assert_eq!(result.access_token_expires_in, 3_600);
        assert_eq!(result.refresh_token_expires_in, 1_209_600);
    }

    #[tokio::test]
    async fn test_assertion_cannot_be_replayed() {
        let fx = fixture();
        let nonce = fx.nonces.issue("kakao").await.unwrap();
        let token = assertion(&fx.signer, "999", &nonce.value);

        fx.auth.sign_in(AuthProvider::Kakao, &token).await.unwrap();
        let replay = fx.auth.sign_in(AuthProvider::Kakao, &token).await.unwrap_err();

        assert_eq!(replay.auth_kind(), Some(AuthError::InvalidNonce));
    }

    #[tokio::test]
    async fn test_never_issued_nonce() {
        let fx = fixture();
        let token = assertion(&fx.signer, "999", "made-up-nonce");

        let err = fx.auth.sign_in(AuthProvider::Kakao, &token).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(AuthError::InvalidNonce));
    }

    #[tokio::test]
    async fn test_nonce_issued_for_other_provider() {
        let fx = fixture();
        let nonce = fx.nonces.issue("apple").await.unwrap();

        let err = fx
            .auth
            .sign_in(AuthProvider::Kakao, &assertion(&fx.signer, "999", &nonce.value))
            .await
            .unwrap_err();
        assert_eq!(err.auth_kind(), Some(AuthError::InvalidNonce));

        // 불일치로 실패해도 논스는 이미 소비됨
        assert!(fx.nonces.consume(&nonce.value).await.is_err());
    }

    #[tokio::test]
    async fn test_forged_assertion_does_not_burn_nonce() {
        let fx = fixture();
        let nonce = fx.nonces.issue("kakao").await.unwrap();
        let forged = assertion(&ProviderSigner::impostor(), "999", &nonce.value);

        let err = fx.auth.sign_in(AuthProvider::Kakao, &forged).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(AuthError::InvalidTokenSignature));

        assert_eq!(fx.nonces.consume(&nonce.value).await.unwrap(), AuthProvider::Kakao);
    }

    #[tokio::test]
    async fn test_returning_member_keeps_id() {
        let fx = fixture();

        for _ in 0..2 {
            let nonce = fx.nonces.issue("kakao").await.unwrap();
            let result = fx
                .auth
                .sign_in(AuthProvider::Kakao, &assertion(&fx.signer, "999", &nonce.value))
                .await
                .unwrap();
            let claims = fx.tokens.verify_access_token(&result.access_token).unwrap();
            assert_eq!(claims.member_id, 42);
        }
    }
}
