//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 모두 생성자 주입으로 만들어지며, `main`에서 한 번 조립된 뒤
//! `web::Data`로 핸들러에 전달됩니다. 조립 과정은 [`crate::core::registry`]를 참고하세요.

pub mod auth;
