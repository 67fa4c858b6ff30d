use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 서비스가 발급하는 액세스 토큰(HS256)의 클레임
///
/// 저장소 조회 없이 서명과 만료만으로 유효성을 판단합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// 회원 ID 문자열
    pub sub: String,
    pub member_id: i64,
    pub iat: i64,
    pub exp: i64,
    /// 토큰마다 고유한 ID
    pub jti: String,
}

impl AccessTokenClaims {
    pub fn new(member_id: i64, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: member_id.to_string(),
            member_id,
            iat: issued_at,
            exp: issued_at + ttl_seconds,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// `exp <= now` 이면 만료입니다.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// 발급된 토큰 문자열과 남은 수명(초)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}
