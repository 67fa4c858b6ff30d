use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 외부 프로바이더 계정과 연결된 내부 회원
///
/// `(provider, provider_id)` 쌍은 유니크 인덱스로 보호됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub member_id: i64,

    pub provider: AuthProvider,

    pub provider_id: String,

    pub created_at: DateTime,
}

impl Member {
    pub fn new(member_id: i64, provider: AuthProvider, provider_id: &str) -> Self {
        Self {
            member_id,
            provider,
            provider_id: provider_id.to_string(),
            created_at: DateTime::now(),
        }
    }
}
