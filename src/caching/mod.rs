//! 만료 키-값 저장소 계층
//!
//! 논스와 리프레시 토큰을 TTL과 함께 보관합니다.
//!
//! - [`store`] - `ExpiringStore` trait 과 CAS 결과 타입
//! - [`redis`] - Redis 구현 (운영)
//! - [`memory`] - 인메모리 구현 (테스트, 로컬 실행)
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! STORE_BACKEND=redis               # redis | memory
//! ```

pub mod memory;
pub mod redis;
pub mod store;

pub use memory::MemoryStore;
pub use store::{ExpiringStore, SwapOutcome};
