use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::utils::random::random_token;

/// 회원당 하나만 살아 있는 리프레시 토큰
///
/// `refreshToken:{memberId}` 키에 JSON으로 저장되며 로그인/회전 때마다 덮어씁니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub member_id: i64,
    pub value: String,
    /// 발급 시각 (unix seconds)
    pub issued_at: i64,
}

impl RefreshToken {
    /// 새 랜덤 값으로 토큰을 만듭니다.
    pub fn issue(member_id: i64) -> Self {
        Self {
            member_id,
            value: random_token(),
            issued_at: Utc::now().timestamp(),
        }
    }

    pub fn storage_key(member_id: i64) -> String {
        format!("refreshToken:{}", member_id)
    }

    pub fn key(&self) -> String {
        Self::storage_key(self.member_id)
    }
}
