//! # Domain Entities
//!
//! 저장소에 영속되는 도메인 객체들입니다.
//!
//! - [`nonce`] - 만료 저장소의 일회용 논스 (`nonce:{value}`)
//! - [`refresh_token`] - 만료 저장소의 리프레시 토큰 (`refreshToken:{memberId}`)
//! - [`member`] - MongoDB `members` 컬렉션의 회원 문서

pub mod member;
pub mod nonce;
pub mod refresh_token;

pub use member::Member;
pub use nonce::Nonce;
pub use refresh_token::RefreshToken;
