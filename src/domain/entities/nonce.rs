//! 일회용 로그인 논스

use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 프로바이더 로그인 한 번에 묶이는 일회용 값
///
/// 저장소에는 `nonce:{value}` 키에 `{"provider":"kakao"}` 형태로 보관되며,
/// 첫 소비 또는 TTL 만료 시 사라집니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce {
    pub value: String,
    pub provider: AuthProvider,
}

/// 저장소에 기록되는 논스 본문
#[derive(Debug, Serialize, Deserialize)]
struct NonceRecord {
    provider: AuthProvider,
}

impl Nonce {
    pub fn new(value: String, provider: AuthProvider) -> Self {
        Self { value, provider }
    }

    pub fn storage_key(value: &str) -> String {
        format!("nonce:{}", value)
    }

    pub fn key(&self) -> String {
        Self::storage_key(&self.value)
    }

    pub fn to_record(&self) -> serde_json::Result<String> {
        serde_json::to_string(&NonceRecord { provider: self.provider })
    }

    pub fn from_record(value: &str, record: &str) -> serde_json::Result<Self> {
        let record: NonceRecord = serde_json::from_str(record)?;
        Ok(Self::new(value.to_string(), record.provider))
    }
}
