use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::MemberResolver;
use crate::config::AuthProvider;
use crate::errors::AppResult;

#[derive(Debug)]
struct Directory {
    next_id: i64,
    members: HashMap<(AuthProvider, String), i64>,
}

/// 인메모리 회원 디렉터리
///
/// 조회와 생성을 하나의 잠금 안에서 처리하므로 같은 계정은 항상 같은 ID를 받습니다.
#[derive(Debug)]
pub struct MemoryMemberDirectory {
    inner: Mutex<Directory>,
}

impl MemoryMemberDirectory {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// 첫 회원에게 `first_id`를 부여하는 디렉터리
    pub fn starting_at(first_id: i64) -> Self {
        Self {
            inner: Mutex::new(Directory {
                next_id: first_id,
                members: HashMap::new(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.members.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryMemberDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberResolver for MemoryMemberDirectory {
    async fn resolve(&self, provider: AuthProvider, provider_id: &str) -> AppResult<i64> {
        let mut directory = self.inner.lock().await;
        let key = (provider, provider_id.to_string());

        if let Some(member_id) = directory.members.get(&key) {
            return Ok(*member_id);
        }

        let member_id = directory.next_id;
        directory.next_id += 1;
        directory.members.insert(key, member_id);
        Ok(member_id)
    }
}
