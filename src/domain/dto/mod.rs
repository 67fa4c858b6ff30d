//! # Data Transfer Objects (DTOs)
//!
//! 인증 API 의 요청/응답 계약을 정의합니다. 모든 필드는 camelCase 로 직렬화됩니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! └── tokens/
//!     ├── request.rs   - IssueNonceRequest, SignInRequest, RefreshTokenRequest
//!     └── response.rs  - NonceResponse, AuthResult, ApiResponse, ErrorResponse
//! ```
//!
//! ## 유효성 검증
//!
//! 요청 DTO 는 `validator` 로 필수 필드를 검사하고, 실패를 HTTP 상태가 아닌
//! 도메인 에러(`AuthError`)로 돌려줍니다.
//!
//! ```rust,ignore
//! let request: SignInRequest = payload.into_inner();
//! let provider = request.validated_provider()?;   // InvalidProvider / MalformedToken
//! ```

pub mod tokens;

pub use tokens::*;
