//! 인증/세션 도메인의 닫힌 에러 분류
//!
//! 모든 변형은 안정적인 에러 코드(`code()`)와 상태 분류(`status_class()`)를 가집니다.
//! HTTP 상태 코드로의 변환은 전송 계층([`crate::errors::AppError`])이 담당합니다.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use thiserror::Error;

/// 전송 계층 독립적인 에러 상태 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 클라이언트 요청 자체가 잘못됨
    BadRequest,
    /// 인증 실패 또는 거부
    Unauthorized,
    /// 서버/프로바이더 측 구성 문제
    ServerFault,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("지원하지 않는 인증 제공자입니다")]
    InvalidProvider,

    #[error("인증 제공자의 사용자 식별자가 올바르지 않습니다")]
    InvalidProviderId,

    #[error("유효하지 않거나 이미 사용된 논스입니다")]
    InvalidNonce,

    #[error("토큰 형식이 올바르지 않습니다")]
    MalformedToken,

    #[error("지원하지 않는 토큰 형식입니다")]
    UnsupportedToken,

    #[error("토큰 서명이 유효하지 않습니다")]
    InvalidTokenSignature,

    #[error("만료된 토큰입니다")]
    ExpiredToken,

    #[error("아직 만료되지 않은 액세스 토큰입니다")]
    NotExpiredToken,

    #[error("유효하지 않은 토큰입니다")]
    InvalidToken,

    #[error("허가되지 않은 접근입니다")]
    UnauthorizedAccess,

    #[error("토큰 검증용 공개키를 찾을 수 없습니다")]
    PublicKeyNotFound,

    #[error("토큰 검증용 공개키가 올바르지 않습니다")]
    InvalidPublicKey,

    #[error("토큰 서명 키의 강도가 충분하지 않습니다")]
    WeakTokenKey,
}

impl AuthError {
    /// 클라이언트가 분기할 수 있는 안정적인 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidProvider => "AUTH_INVALID_PROVIDER",
            AuthError::InvalidProviderId => "AUTH_INVALID_PROVIDER_ID",
            AuthError::InvalidNonce => "AUTH_INVALID_NONCE",
            AuthError::MalformedToken => "AUTH_MALFORMED_TOKEN",
            AuthError::UnsupportedToken => "AUTH_UNSUPPORTED_TOKEN",
            AuthError::InvalidTokenSignature => "AUTH_INVALID_TOKEN_SIGNATURE",
            AuthError::ExpiredToken => "AUTH_EXPIRED_TOKEN",
            AuthError::NotExpiredToken => "AUTH_NOT_EXPIRED_TOKEN",
            AuthError::InvalidToken => "AUTH_INVALID_TOKEN",
            AuthError::UnauthorizedAccess => "AUTH_UNAUTHORIZED_ACCESS",
            AuthError::PublicKeyNotFound => "AUTH_PUBLIC_KEY_NOT_FOUND",
            AuthError::InvalidPublicKey => "AUTH_INVALID_PUBLIC_KEY",
            AuthError::WeakTokenKey => "AUTH_WEAK_TOKEN_KEY",
        }
    }

    pub fn status_class(&self) -> StatusClass {
        match self {
            AuthError::InvalidProvider
            | AuthError::InvalidProviderId
            | AuthError::MalformedToken
            | AuthError::UnsupportedToken
            | AuthError::NotExpiredToken => StatusClass::BadRequest,

            AuthError::InvalidNonce
            | AuthError::InvalidTokenSignature
            | AuthError::ExpiredToken
            | AuthError::InvalidToken
            | AuthError::UnauthorizedAccess => StatusClass::Unauthorized,

            AuthError::PublicKeyNotFound
            | AuthError::InvalidPublicKey
            | AuthError::WeakTokenKey => StatusClass::ServerFault,
        }
    }
}

/// `jsonwebtoken` 검증 실패를 도메인 에러로 분류합니다.
///
/// issuer/audience 불일치는 "이 서비스에 대해 진본이 아닌 토큰"으로 보고
/// 서명 실패와 같은 변형으로 취급합니다.
impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            JwtErrorKind::InvalidSignature
            | JwtErrorKind::InvalidIssuer
            | JwtErrorKind::InvalidAudience => AuthError::InvalidTokenSignature,
            JwtErrorKind::InvalidAlgorithm
            | JwtErrorKind::InvalidAlgorithmName
            | JwtErrorKind::MissingAlgorithm => AuthError::UnsupportedToken,
            JwtErrorKind::InvalidRsaKey(_) | JwtErrorKind::InvalidKeyFormat => {
                AuthError::InvalidPublicKey
            }
            _ => AuthError::MalformedToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AuthError; 13] = [
        AuthError::InvalidProvider,
        AuthError::InvalidProviderId,
        AuthError::InvalidNonce,
        AuthError::MalformedToken,
        AuthError::UnsupportedToken,
        AuthError::InvalidTokenSignature,
        AuthError::ExpiredToken,
        AuthError::NotExpiredToken,
        AuthError::InvalidToken,
        AuthError::UnauthorizedAccess,
        AuthError::PublicKeyNotFound,
        AuthError::InvalidPublicKey,
        AuthError::WeakTokenKey,
    ];

    #[test]
    fn test_codes_are_unique_and_prefixed() {
        let mut codes: Vec<&str> = ALL.iter().map(|e| e.code()).collect();
        assert!(codes.iter().all(|code| code.starts_with("AUTH_")));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL.len());
    }

    #[test]
    fn test_status_classes() {
        assert_eq!(AuthError::NotExpiredToken.status_class(), StatusClass::BadRequest);
        assert_eq!(AuthError::InvalidNonce.status_class(), StatusClass::Unauthorized);
        assert_eq!(AuthError::UnauthorizedAccess.status_class(), StatusClass::Unauthorized);
        assert_eq!(AuthError::WeakTokenKey.status_class(), StatusClass::ServerFault);
        assert_eq!(AuthError::PublicKeyNotFound.status_class(), StatusClass::ServerFault);
    }

    #[test]
    fn test_jwt_error_classification() {
        let cases = [
            (JwtErrorKind::ExpiredSignature, AuthError::ExpiredToken),
            (JwtErrorKind::InvalidSignature, AuthError::InvalidTokenSignature),
            (JwtErrorKind::InvalidIssuer, AuthError::InvalidTokenSignature),
            (JwtErrorKind::InvalidAudience, AuthError::InvalidTokenSignature),
            (JwtErrorKind::InvalidAlgorithm, AuthError::UnsupportedToken),
            (JwtErrorKind::InvalidToken, AuthError::MalformedToken),
        ];

        for (kind, expected) in cases {
            assert_eq!(AuthError::from(JwtError::from(kind)), expected);
        }
    }
}
