//! # Service Registry
//!
//! 서비스 그래프를 명시적으로 조립하는 컨테이너입니다.
//!
//! ```text
//! ExpiringStore ──┬─ NonceRepository ──────── NonceService ───────┐
//!                 └─ RefreshTokenRepository ┬ TokenService ───────┼─ AuthService
//!                                           └ RefreshService      │
//! PublicKeySource ─── ProviderVerifier ───────────────────────────┤
//! MemberResolver ─────────────────────────────────────────────────┘
//! ```
//!
//! 인프라 백엔드(Redis/메모리, MongoDB/메모리)는 호출자가 고르고, 이 모듈은
//! 트레이트 객체로만 다룹니다.

use std::sync::Arc;

use actix_web::web;

use crate::caching::ExpiringStore;
use crate::config::AuthSettings;
use crate::repositories::{MemberResolver, NonceRepository, RefreshTokenRepository};
use crate::services::auth::{
    AuthService, NonceService, ProviderVerifier, PublicKeySource, RefreshService, TokenService,
};

/// 조립이 끝난 서비스 묶음
///
/// 복제 비용은 `Arc` 몇 개이므로 워커마다 복제해 등록합니다.
#[derive(Clone)]
pub struct ServiceRegistry {
    pub nonce_service: Arc<NonceService>,
    pub token_service: Arc<TokenService>,
    pub refresh_service: Arc<RefreshService>,
    pub auth_service: Arc<AuthService>,
}

impl ServiceRegistry {
    pub fn assemble(
        store: Arc<dyn ExpiringStore>,
        key_source: Arc<dyn PublicKeySource>,
        members: Arc<dyn MemberResolver>,
        settings: &AuthSettings,
    ) -> Self {
        let nonce_repository = Arc::new(NonceRepository::new(store.clone()));
        let refresh_repository = Arc::new(RefreshTokenRepository::new(store));

        let nonce_service = Arc::new(NonceService::new(nonce_repository, settings.nonce_ttl_seconds));
        let token_service = Arc::new(TokenService::new(
            settings.token.clone(),
            refresh_repository.clone(),
        ));
        let refresh_service = Arc::new(RefreshService::new(
            token_service.clone(),
            refresh_repository,
        ));
        let verifier = Arc::new(ProviderVerifier::new(key_source, settings.verifier.clone()));
        let auth_service = Arc::new(AuthService::new(
            verifier,
            nonce_service.clone(),
            members,
            token_service.clone(),
        ));

        log::info!(
            "✅ 서비스 조립 완료 (논스 TTL {}초, 액세스 {}초, 리프레시 {}초)",
            settings.nonce_ttl_seconds,
            settings.token.access_token_ttl_seconds,
            settings.token.refresh_token_ttl_seconds
        );

        Self {
            nonce_service,
            token_service,
            refresh_service,
            auth_service,
        }
    }

    /// 핸들러와 미들웨어가 꺼내 쓸 수 있도록 `web::Data`로 등록합니다.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.nonce_service.clone()))
            .app_data(web::Data::from(self.token_service.clone()))
            .app_data(web::Data::from(self.refresh_service.clone()))
            .app_data(web::Data::from(self.auth_service.clone()));
    }
}
