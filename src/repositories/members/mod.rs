//! 회원 식별자 리포지토리
//!
//! 세션 발급에 필요한 것은 "검증된 프로바이더 계정 → 내부 회원 ID" 매핑 하나뿐입니다.
//! 서비스는 [`MemberResolver`] trait 에만 의존합니다.
//!
//! - [`MemberRepository`] - MongoDB 구현 (운영)
//! - [`MemoryMemberDirectory`] - 인메모리 구현 (테스트, 로컬 실행)

use async_trait::async_trait;

use crate::config::AuthProvider;
use crate::errors::AppResult;

pub mod member_repository;
pub mod memory_directory;

pub use member_repository::MemberRepository;
pub use memory_directory::MemoryMemberDirectory;

#[async_trait]
pub trait MemberResolver: Send + Sync {
    /// 계정에 연결된 회원 ID를 돌려주고, 없으면 새 회원을 만듭니다.
    async fn resolve(&self, provider: AuthProvider, provider_id: &str) -> AppResult<i64>;
}
