//! # Configuration Module
//!
//! 서비스 설정 관리를 담당하는 모듈입니다.
//! 모든 설정값은 환경 변수에서 읽으며, `main`에서 `PROFILE`에 맞는 `.env` 파일을 먼저 로드합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소 백엔드 설정
//! - [`auth_config`] - 프로바이더, 논스, JWT 토큰 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전
//! - 서비스는 환경 변수를 직접 읽지 않고, 조립된 설정 값 객체를 생성자로 받습니다

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
