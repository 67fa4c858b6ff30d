use serde::{Deserialize, Serialize};

use crate::domain::models::token::IssuedToken;

pub const BEARER: &str = "Bearer";

/// 로그인/갱신 결과로 내려가는 토큰 쌍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub token_type: String,
    pub access_token: String,
    pub access_token_expires_in: i64,
    pub refresh_token: String,
    pub refresh_token_expires_in: i64,
}

impl AuthResult {
    pub fn bearer(access: IssuedToken, refresh: IssuedToken) -> Self {
        Self {
            token_type: BEARER.to_string(),
            access_token: access.token,
            access_token_expires_in: access.expires_in,
            refresh_token: refresh.token,
            refresh_token_expires_in: refresh.expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonceResponse {
    pub nonce: String,
}

/// 모든 실패 응답의 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
        }
    }
}
