//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 도메인 에러([`AuthError`])와 인프라 장애를 하나의 `AppError`로 묶고,
//! `actix_web::ResponseError`를 통해 일관된 JSON 응답으로 변환합니다.
//!
//! 응답 본문은 항상 `{ "code": "...", "message": "..." }` 형태이며,
//! 인프라 장애의 상세 내용(연결 문자열, 키 재료, 저장소 상태)은 로그에만 남깁니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppError, AuthError};
//!
//! async fn consume(value: &str) -> Result<AuthProvider, AppError> {
//!     let nonce = nonce_repo.take(value).await?
//!         .ok_or(AuthError::InvalidNonce)?;
//!     Ok(nonce.provider)
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use super::auth_error::{AuthError, StatusClass};
use crate::domain::dto::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 인증/세션 도메인 에러 (상태는 `StatusClass`를 따름)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// 만료 키-값 저장소 에러 (500 Internal Server Error)
    #[error("Store error: {0}")]
    StoreError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Auth(err) => err.code(),
            AppError::StoreError(_) => "STORE_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_class(&self) -> StatusClass {
        match self {
            AppError::Auth(err) => err.status_class(),
            AppError::ValidationError(_) => StatusClass::BadRequest,
            _ => StatusClass::ServerFault,
        }
    }

    /// 도메인 에러라면 그 변형을 돌려줍니다.
    pub fn auth_kind(&self) -> Option<AuthError> {
        match self {
            AppError::Auth(err) => Some(*err),
            _ => None,
        }
    }

    /// 클라이언트에게 노출해도 되는 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::Auth(err) => err.to_string(),
            AppError::ValidationError(msg) => msg.clone(),
            _ => "서버 내부 오류가 발생했습니다".to_string(),
        }
    }
}

impl From<StatusClass> for StatusCode {
    fn from(class: StatusClass) -> Self {
        match class {
            StatusClass::BadRequest => StatusCode::BAD_REQUEST,
            StatusClass::Unauthorized => StatusCode::UNAUTHORIZED,
            StatusClass::ServerFault => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status_class().into()
    }

    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> HttpResponse {
        if self.status_class() == StatusClass::ServerFault {
            log::error!("❌ 요청 처리 실패 [{}]: {}", self.code(), self);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            code: self.code().to_string(),
            message: self.public_message(),
        })
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::StoreError(err.to_string())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_not_expired_token_is_bad_request() {
        let (status, body) = body_json(AuthError::NotExpiredToken.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "AUTH_NOT_EXPIRED_TOKEN");
        assert!(body["message"].as_str().is_some());
    }

    #[actix_web::test]
    async fn test_unauthorized_access_is_unauthorized() {
        let (status, body) = body_json(AuthError::UnauthorizedAccess.into()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "AUTH_UNAUTHORIZED_ACCESS");
    }

    #[actix_web::test]
    async fn test_weak_key_is_server_fault() {
        let (status, body) = body_json(AuthError::WeakTokenKey.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "AUTH_WEAK_TOKEN_KEY");
    }

    #[actix_web::test]
    async fn test_store_error_hides_details() {
        let (status, body) =
            body_json(AppError::StoreError("redis://secret-host:6379 refused".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "STORE_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("secret-host"));
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("provider is required".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.auth_kind(), None);
    }

    #[test]
    fn test_auth_kind_round_trip() {
        let error: AppError = AuthError::InvalidNonce.into();
        assert_eq!(error.auth_kind(), Some(AuthError::InvalidNonce));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
