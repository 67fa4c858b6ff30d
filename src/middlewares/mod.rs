//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer {accessToken}` 헤더 추출
//! - 서명/만료 검증 (저장소 조회 없음)
//! - 검증된 회원 정보를 request extension 에 저장
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//!
//! web::resource("/sign-out")
//!     .wrap(AuthMiddleware::required())
//!     .route(web::post().to(sign_out));
//! ```
//!
//! 미들웨어는 앱 데이터로 등록된 `web::Data<TokenService>`를 사용합니다.

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
