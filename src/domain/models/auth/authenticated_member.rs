//! # 인증된 회원 정보
//!
//! 인증 미들웨어가 액세스 토큰을 검증한 뒤 요청 extensions 에 넣어 두는 값입니다.
//! 핸들러는 함수 인자로 `AuthenticatedMember`를 선언하기만 하면 됩니다.
//!
//! ```rust,ignore
//! async fn sign_out(member: AuthenticatedMember) -> Result<HttpResponse, AppError> {
//!     log::info!("로그아웃: {}", member.member_id);
//!     Ok(HttpResponse::Ok().finish())
//! }
//! ```

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::domain::models::token::AccessTokenClaims;
use crate::errors::{AppError, AuthError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedMember {
    pub member_id: i64,
}

impl From<AccessTokenClaims> for AuthenticatedMember {
    fn from(claims: AccessTokenClaims) -> Self {
        Self {
            member_id: claims.member_id,
        }
    }
}

impl FromRequest for AuthenticatedMember {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedMember>() {
            Some(member) => ready(Ok(member.clone())),
            None => ready(Err(AppError::from(AuthError::InvalidToken).into())),
        }
    }
}
