//! # Domain Models Module
//!
//! 영속되지 않는 값 객체와 외부 시스템 통합 모델입니다.
//!
//! ## Entities vs Models 구분
//!
//! - **Entities** (`../entities/`): 저장소에 기록되는 객체 (`Nonce`, `RefreshToken`, `Member`)
//! - **Models** (`./`): 요청 처리 중에만 존재하는 값 (토큰 클레임, 프로바이더 키, 인증된 회원)
//!
//! ## 모듈 구성
//!
//! - [`token`] - 액세스 토큰 클레임과 발급 결과
//! - [`oauth`] - 프로바이더 JWKS 와 ID 토큰 클레임
//! - [`auth`] - 인증 미들웨어가 주입하는 `AuthenticatedMember`

pub mod auth;
pub mod oauth;
pub mod token;

pub use auth::AuthenticatedMember;
pub use oauth::{ProviderAssertionClaims, ProviderKey, ProviderKeySet, VerifiedIdentity};
pub use token::{AccessTokenClaims, IssuedToken};
