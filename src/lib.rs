//! 소셜 로그인 세션 백엔드
//!
//! 카카오/애플/구글 ID 토큰으로 로그인 세션을 수립하고, 액세스/리프레시 토큰의
//! 수명 주기를 관리하는 Rust 서비스입니다.
//!
//! # Features
//!
//! - **논스 핸드셰이크**: 일회용 논스로 ID 토큰 재사용 차단
//! - **ID 토큰 검증**: 프로바이더 JWKS 기반 RS256 서명/만료/발급자 검증
//! - **세션 토큰**: HS256 액세스 토큰 + 회원당 하나의 리프레시 토큰
//! - **토큰 회전**: 만료 후에만 허용, CAS 로 동시 갱신 중 하나만 성공
//! - **Redis / MongoDB**: 만료 저장소와 회원 디렉터리, 로컬용 인메모리 대체 구현
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 논스, 검증, 토큰 발급/회전
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Redis + MongoDB │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use oauth_session_backend::caching::MemoryStore;
//! use oauth_session_backend::core::ServiceRegistry;
//!
//! let registry = ServiceRegistry::assemble(store, key_source, members, &settings);
//! let nonce = registry.nonce_service.issue("kakao").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
