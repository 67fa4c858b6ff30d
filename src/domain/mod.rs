//! # Domain Layer Module
//!
//! 인증/세션 도메인의 데이터 구조를 모아 둔 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 저장소에 기록되는 객체 (Nonce, RefreshToken, Member)
//! ├── dto       - API 요청/응답 계약
//! └── models    - 토큰 클레임, 프로바이더 키, 인증된 회원 같은 값 객체
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, caching, db)
//! ```
//!
//! ## 세션 수명주기 한눈에 보기
//!
//! 1. 클라이언트가 프로바이더를 지정해 논스를 받는다 (`Nonce`, TTL 300초)
//! 2. 프로바이더 로그인 시 그 논스를 ID 토큰에 포함시킨다
//! 3. 서비스가 ID 토큰을 검증하고 논스를 소비한 뒤 회원을 찾거나 만든다 (`Member`)
//! 4. 액세스 토큰(`AccessTokenClaims`)과 리프레시 토큰(`RefreshToken`)을 발급한다
//! 5. 액세스 토큰이 만료되면 두 토큰을 함께 제출해 새 쌍으로 회전한다
//!
//! ## 설계 원칙
//!
//! - 도메인 타입은 HTTP/저장소 구현에 의존하지 않습니다.
//!   (예외: `AuthenticatedMember`의 `FromRequest`, `Member`의 BSON 날짜)
//! - 저장 키 형식(`nonce:{value}`, `refreshToken:{memberId}`)은 엔티티가 소유합니다.

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
pub use entities::*;
pub use models::*;
