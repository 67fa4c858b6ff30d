//! Authentication HTTP Handlers
//!
//! 소셜 로그인 세션 수립과 토큰 수명 주기를 처리하는 엔드포인트입니다.
//!
//! # Flow
//!
//! 1. `POST /api/v1/auth/nonce` - 로그인 시작 전 일회용 논스 발급
//! 2. `POST /api/v1/auth/sign-in` - 프로바이더 ID 토큰으로 세션 발급
//! 3. `POST /api/v1/auth/refresh` - 만료된 액세스 토큰 회전
//! 4. `POST /api/v1/auth/sign-out` - 리프레시 토큰 폐기 (Bearer 필요)

use actix_web::{post, web, HttpResponse};

use crate::domain::{
    ApiResponse, AuthenticatedMember, IssueNonceRequest, NonceResponse, RefreshTokenRequest,
    SignInRequest,
};
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::{AuthService, NonceService, RefreshService, TokenService};

/// 논스 발급 핸들러
///
/// 클라이언트는 받은 논스를 프로바이더 로그인 요청에 실어 보내고,
/// 프로바이더가 ID 토큰의 `nonce` 클레임에 그대로 돌려줍니다.
///
/// # Endpoint
/// `POST /api/v1/auth/nonce`
///
/// ```json
/// { "provider": "kakao" }
/// ```
#[post("/nonce")]
pub async fn issue_nonce(
    payload: web::Json<IssueNonceRequest>,
    nonce_service: web::Data<NonceService>,
) -> Result<HttpResponse, AppError> {
    let provider = payload.validated_provider()?;
    let nonce = nonce_service.issue_for(provider).await?;

    Ok(HttpResponse::Ok().json(NonceResponse { nonce: nonce.value }))
}

/// 소셜 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/sign-in`
///
/// ```json
/// { "provider": "kakao", "signedAssertion": "eyJhbGciOiJSUzI1NiIs..." }
/// ```
#[post("/sign-in")]
pub async fn sign_in(
    payload: web::Json<SignInRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let provider = payload.validated_provider()?;
    let result = auth_service
        .sign_in(provider, &payload.signed_assertion)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// 토큰 갱신 핸들러
///
/// 액세스 토큰이 만료된 뒤에만 회전할 수 있습니다.
///
/// # Endpoint
/// `POST /api/v1/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    payload: web::Json<RefreshTokenRequest>,
    refresh_service: web::Data<RefreshService>,
) -> Result<HttpResponse, AppError> {
    payload.check()?;
    let result = refresh_service
        .refresh(&payload.access_token, &payload.refresh_token)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// 로그아웃 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/sign-out`
///
/// `Authorization: Bearer {accessToken}` 헤더가 필요합니다.
#[post("/sign-out", wrap = "AuthMiddleware::required()")]
pub async fn sign_out(
    member: AuthenticatedMember,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    token_service.revoke_refresh_token(member.member_id).await?;
    log::info!("로그아웃: member_id={}", member.member_id);

    Ok(HttpResponse::Ok().json(ApiResponse::message("로그아웃되었습니다")))
}
