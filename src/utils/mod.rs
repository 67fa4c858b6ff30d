//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`random`] - 논스/리프레시 토큰 값 생성
//! - [`string_utils`] - 외부 식별자 문자열 검사

pub mod random;
pub mod string_utils;
