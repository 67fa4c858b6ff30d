//! 에러 타입 모음
//!
//! - [`auth_error`] - 인증/세션 도메인의 닫힌 에러 분류
//! - [`errors`] - 애플리케이션 전역 `AppError`와 HTTP 응답 변환

pub mod auth_error;
pub mod errors;

pub use auth_error::{AuthError, StatusClass};
pub use errors::{AppError, AppResult, ErrorContext};
