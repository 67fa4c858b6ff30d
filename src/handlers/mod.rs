//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청 DTO 검증과 응답 직렬화만 담당하고, 실제 로직은 서비스 계층에 위임합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Mobile App)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                            ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 논스, 검증, 토큰 회전              ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 만료 저장소, 회원 디렉터리      ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 서비스 주입
//!
//! 서비스는 [`crate::core::ServiceRegistry`]가 `web::Data`로 등록합니다.
//! 핸들러는 필요한 서비스를 인자로 선언합니다.
//!
//! ```rust,ignore
//! #[post("/nonce")]
//! pub async fn issue_nonce(
//!     payload: web::Json<IssueNonceRequest>,
//!     nonce_service: web::Data<NonceService>,
//! ) -> Result<HttpResponse, AppError> { ... }
//! ```
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며, 에러는
//! `{ "code": "...", "message": "..." }` 본문으로 변환됩니다.

pub mod auth;
