//! 데이터 액세스 계층
//!
//! - [`tokens`] - 만료 저장소 위의 논스/리프레시 토큰 리포지토리
//! - [`members`] - 회원 식별자 매핑 (`MemberResolver`)
//!
//! 리포지토리는 생성자로 저장소 핸들을 받으며, 서비스 계층에서 `Arc`로 공유됩니다.

pub mod members;
pub mod tokens;

pub use members::{MemberRepository, MemberResolver, MemoryMemberDirectory};
pub use tokens::{NonceRepository, RefreshTokenRepository, StoredRefreshToken};
