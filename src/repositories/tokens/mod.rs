//! 토큰 관련 만료 저장소 리포지토리
//!
//! # Features
//!
//! - **논스**: 조건부 생성 + 원자적 소비 ([`NonceRepository`])
//! - **리프레시 토큰**: 회원당 하나, 덮어쓰기 저장 + CAS 회전 ([`RefreshTokenRepository`])
//! - **TTL 자동 관리**: 만료는 저장소가 처리하며 리포지토리는 TTL만 전달합니다
//!
//! # Usage
//!
//! ```rust,ignore
//! let nonces = NonceRepository::new(store.clone());
//! let refresh_tokens = RefreshTokenRepository::new(store);
//!
//! refresh_tokens.save(&RefreshToken::issue(42), 1_209_600).await?;
//! ```

pub mod nonce_repository;
pub mod refresh_token_repository;

pub use nonce_repository::NonceRepository;
pub use refresh_token_repository::{RefreshTokenRepository, StoredRefreshToken};
