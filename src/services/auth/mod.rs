//! 인증 및 세션 서비스 모듈
//!
//! 외부 프로바이더 로그인부터 세션 토큰 회전까지의 비즈니스 로직을 담당합니다.
//!
//! # Components
//!
//! - [`NonceService`] - 일회용 논스 발급/소비
//! - [`ProviderVerifier`] - 프로바이더 ID 토큰(RS256) 검증
//! - [`PublicKeySource`] - 프로바이더 JWKS 조회 (HTTP + 캐시, 고정 키)
//! - [`TokenService`] - 액세스/리프레시 토큰 발급, 검증, 폐기
//! - [`RefreshService`] - 만료된 세션의 토큰 회전
//! - [`AuthService`] - 로그인 오케스트레이션
//!
//! # Security
//!
//! - 액세스 토큰: HMAC-SHA256 서명, 저장소 조회 없는 검증
//! - 리프레시 토큰: 회원당 하나, 회전 시 CAS 교체 + 상수 시간 비교
//! - 논스: 검증 통과 후 원자적으로 소비하여 ID 토큰 재사용 차단
//!
//! # Examples
//!
//! ```rust,ignore
//! let nonce = nonce_service.issue("kakao").await?;
//! // ... 클라이언트가 프로바이더 로그인 후 ID 토큰 제출
//! let session = auth_service.sign_in(AuthProvider::Kakao, &id_token).await?;
//! let rotated = refresh_service.refresh(&session.access_token, &session.refresh_token).await?;
//! ```

pub mod auth_service;
pub mod nonce_service;
pub mod provider_verifier;
pub mod public_keys;
pub mod refresh_service;
pub mod token_service;

#[cfg(test)]
pub(crate) mod test_keys;

pub use auth_service::AuthService;
pub use nonce_service::NonceService;
pub use provider_verifier::ProviderVerifier;
pub use public_keys::{
    HttpKeySetFetcher, JwksPublicKeySource, KeySetFetcher, PublicKeySource, StaticPublicKeySource,
};
pub use refresh_service::RefreshService;
pub use token_service::{ExpiryPolicy, TokenService};
