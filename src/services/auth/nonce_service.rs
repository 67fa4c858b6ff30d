//! 논스 발급/소비 서비스
//!
//! 논스는 프로바이더 로그인 한 번에만 쓸 수 있는 값입니다.
//! 클라이언트는 발급받은 논스를 프로바이더 로그인 요청에 실어 보내고,
//! 프로바이더는 그 값을 ID 토큰의 `nonce` 클레임에 넣어 돌려줍니다.
//! 로그인 시점에 논스를 소비(삭제)하므로 같은 ID 토큰을 다시 제출할 수 없습니다.

use std::sync::Arc;

use crate::config::AuthProvider;
use crate::domain::entities::Nonce;
use crate::errors::{AppError, AppResult, AuthError};
use crate::repositories::NonceRepository;
use crate::utils::random::random_token;
use crate::utils::string_utils::is_blank;

/// 충돌 시 새 값을 뽑는 최대 횟수
const MAX_ISSUE_ATTEMPTS: usize = 3;

pub struct NonceService {
    nonces: Arc<NonceRepository>,
    ttl_seconds: u64,
}

impl NonceService {
    pub fn new(nonces: Arc<NonceRepository>, ttl_seconds: u64) -> Self {
        Self { nonces, ttl_seconds }
    }

    /// 프로바이더 이름으로 논스를 발급합니다. 모르는 이름이면 `InvalidProvider`.
    pub async fn issue(&self, provider: &str) -> AppResult<Nonce> {
        let provider: AuthProvider = provider.parse()?;
        self.issue_for(provider).await
    }

    pub async fn issue_for(&self, provider: AuthProvider) -> AppResult<Nonce> {
        for _ in 0..MAX_ISSUE_ATTEMPTS {
            let nonce = Nonce::new(random_token(), provider);

            if self.nonces.create(&nonce, self.ttl_seconds).await? {
                log::debug!("논스 발급: provider={}", provider);
                return Ok(nonce);
            }
            log::warn!("논스 값 충돌, 재발급 시도: provider={}", provider);
        }

        Err(AppError::InternalError("고유한 논스를 생성하지 못했습니다".to_string()))
    }

    /// 논스를 소비하고 발급 당시의 프로바이더를 돌려줍니다.
    ///
    /// 없거나, 만료됐거나, 이미 소비된 논스는 모두 `InvalidNonce`입니다.
    pub async fn consume(&self, value: &str) -> AppResult<AuthProvider> {
        if is_blank(value) {
            return Err(AuthError::InvalidNonce.into());
        }

        match self.nonces.take(value).await? {
            Some(nonce) => Ok(nonce.provider),
            None => {
                log::warn!("유효하지 않은 논스 소비 시도");
                Err(AuthError::InvalidNonce.into())
            }
        }
    }
}
