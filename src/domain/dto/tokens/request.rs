//! 인증 API 요청 DTO
//!
//! 필드가 아예 빠진 요청도 역직렬화는 성공시키고(`#[serde(default)]`),
//! 검증 단계에서 도메인 에러로 분류합니다. 덕분에 클라이언트는 항상
//! `{code, message}` 형태의 에러를 받습니다.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::config::AuthProvider;
use crate::errors::AuthError;

fn has_field_error(errors: &ValidationErrors, field: &str) -> bool {
    errors.field_errors().contains_key(field)
}

/// `POST /api/v1/auth/nonce`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IssueNonceRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "provider는 필수입니다"))]
    pub provider: String,
}

impl IssueNonceRequest {
    pub fn validated_provider(&self) -> Result<AuthProvider, AuthError> {
        self.validate().map_err(|_| AuthError::InvalidProvider)?;
        self.provider.parse()
    }
}

/// `POST /api/v1/auth/sign-in`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "provider는 필수입니다"))]
    pub provider: String,

    /// 프로바이더가 서명한 ID 토큰
    #[serde(default)]
    #[validate(length(min = 1, message = "signedAssertion은 필수입니다"))]
    pub signed_assertion: String,
}

impl SignInRequest {
    pub fn validated_provider(&self) -> Result<AuthProvider, AuthError> {
        if let Err(errors) = self.validate() {
            if has_field_error(&errors, "provider") {
                return Err(AuthError::InvalidProvider);
            }
            return Err(AuthError::MalformedToken);
        }
        self.provider.parse()
    }
}

/// `POST /api/v1/auth/refresh`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "accessToken은 필수입니다"))]
    pub access_token: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "refreshToken은 필수입니다"))]
    pub refresh_token: String,
}

impl RefreshTokenRequest {
    pub fn check(&self) -> Result<(), AuthError> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) if has_field_error(&errors, "access_token") => Err(AuthError::MalformedToken),
            Err(_) => Err(AuthError::InvalidToken),
        }
    }
}
