//! # OAuth 프로바이더 모델
//!
//! 외부 ID 프로바이더(kakao, apple, google)가 발급한 ID 토큰을 검증할 때 쓰는 모델입니다.
//!
//! - [`ProviderKeySet`] / [`ProviderKey`] - 프로바이더가 공개하는 JWKS 문서
//! - [`ProviderAssertionClaims`] - ID 토큰에서 읽는 `sub`, `nonce` 클레임
//! - [`VerifiedIdentity`] - 서명/만료/발급자 검증을 통과한 결과
//!
//! 세 프로바이더 모두 RS256 으로 서명한 OpenID Connect ID 토큰을 사용하므로
//! 프로바이더별 모델을 따로 두지 않습니다.

pub mod provider_keys;

pub use provider_keys::*;
