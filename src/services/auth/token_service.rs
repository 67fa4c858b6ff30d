//! 세션 토큰 발급 서비스
//!
//! - **액세스 토큰**: HS256 JWT. 저장소 조회 없이 서명과 만료만으로 검증합니다.
//! - **리프레시 토큰**: 32바이트 랜덤 값. 회원당 하나만 저장소에 보관하며 발급 때마다 덮어씁니다.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::TokenSettings;
use crate::domain::dto::AuthResult;
use crate::domain::entities::RefreshToken;
use crate::domain::models::token::{AccessTokenClaims, IssuedToken};
use crate::errors::{AppError, AppResult, AuthError};
use crate::repositories::RefreshTokenRepository;

const BEARER_PREFIX: &str = "Bearer ";

/// 액세스 토큰 디코딩 시 만료 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// API 인증: 만료된 토큰은 `ExpiredToken`
    Enforce,
    /// 토큰 갱신 1단계: 서명만 확인
    Ignore,
}

pub struct TokenService {
    settings: TokenSettings,
    refresh_tokens: Arc<RefreshTokenRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(settings: TokenSettings, refresh_tokens: Arc<RefreshTokenRepository>) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());

        Self {
            settings,
            refresh_tokens,
            encoding_key,
            decoding_key,
        }
    }

    pub fn access_token_ttl(&self) -> i64 {
        self.settings.access_token_ttl_seconds
    }

    pub fn refresh_token_ttl(&self) -> i64 {
        self.settings.refresh_token_ttl_seconds
    }

    /// 저장소에 넘길 리프레시 토큰 TTL. 저장소는 0초 TTL을 받지 않습니다.
    pub(crate) fn refresh_token_store_ttl(&self) -> u64 {
        self.settings.refresh_token_ttl_seconds.max(1) as u64
    }

    pub fn issue_access_token(&self, member_id: i64) -> AppResult<IssuedToken> {
        let claims = AccessTokenClaims::new(
            member_id,
            Utc::now().timestamp(),
            self.settings.access_token_ttl_seconds,
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in: self.settings.access_token_ttl_seconds,
        })
    }

    /// 새 리프레시 토큰을 만들어 회원의 기존 토큰을 덮어씁니다.
    pub async fn issue_refresh_token(&self, member_id: i64) -> AppResult<IssuedToken> {
        let refresh_token = RefreshToken::issue(member_id);
        self.refresh_tokens
            .save(&refresh_token, self.refresh_token_store_ttl())
            .await?;

        Ok(IssuedToken {
            token: refresh_token.value,
            expires_in: self.settings.refresh_token_ttl_seconds,
        })
    }

    pub async fn issue_pair(&self, member_id: i64) -> AppResult<AuthResult> {
        let access = self.issue_access_token(member_id)?;
        let refresh = self.issue_refresh_token(member_id).await?;

        log::info!("✅ 세션 발급: member_id={}", member_id);
        Ok(AuthResult::bearer(access, refresh))
    }

    pub fn decode_access_token(
        &self,
        token: &str,
        policy: ExpiryPolicy,
    ) -> Result<AccessTokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::from)?;

        if policy == ExpiryPolicy::Enforce && claims.is_expired_at(Utc::now().timestamp()) {
            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }

    /// API 인증용 검증 (만료 포함)
    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        self.decode_access_token(token, ExpiryPolicy::Enforce)
    }

    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AuthError> {
        auth_header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::InvalidToken)
    }

    /// 회원의 리프레시 토큰을 폐기합니다. 이미 없으면 아무 일도 하지 않습니다.
    pub async fn revoke_refresh_token(&self, member_id: i64) -> AppResult<()> {
        if self.refresh_tokens.delete(member_id).await? {
            log::info!("🔒 리프레시 토큰 폐기: member_id={}", member_id);
        }
        Ok(())
    }
}
