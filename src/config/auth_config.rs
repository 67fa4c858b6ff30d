//! # Authentication Configuration Module
//!
//! OAuth 프로바이더, 논스, JWT 토큰 수명 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! 설정값은 두 층으로 나뉩니다.
//!
//! 1. **정적 설정 리더** (`JwtConfig`, `NonceConfig`, `ProviderConfig`):
//!    환경 변수를 읽어 기본값과 함께 돌려줍니다.
//! 2. **설정 값 객체** (`TokenSettings`, `VerifierSettings`, `AuthSettings`):
//!    `main`에서 한 번 조립되어 각 서비스 생성자로 전달됩니다.
//!    테스트는 환경 변수 없이 값 객체를 직접 만들어 사용합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export ACCESS_TOKEN_EXPIRATION_SECONDS="3600"
//! export REFRESH_TOKEN_EXPIRATION_SECONDS="1209600"
//! export NONCE_TTL_SECONDS="300"
//! ```
//!
//! ## 프로바이더 설정 (선택)
//!
//! ```bash
//! export KAKAO_JWKS_URI="https://kauth.kakao.com/.well-known/jwks.json"
//! export KAKAO_ISSUER="https://kauth.kakao.com"
//! export KAKAO_CLIENT_ID="your-kakao-app-key"      # 비어 있으면 audience 검증 생략
//! export PUBLIC_KEY_CACHE_SECONDS="3600"
//! export PROVIDER_MIN_KEY_BITS="2048"
//! export PROVIDER_CLOCK_LEEWAY_SECONDS="60"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AuthProvider, AuthSettings};
//!
//! let provider: AuthProvider = "KAKAO".parse()?;
//! let settings = AuthSettings::from_env();
//! ```

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::data_config::Environment;
use crate::errors::AuthError;

/// 환경 변수를 읽어 파싱하고, 없거나 잘못된 값이면 기본값을 사용합니다.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} 값 '{}' 파싱 실패, 기본값 {} 사용", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

/// 쉼표로 구분된 환경 변수를 목록으로 읽습니다. 빈 항목은 버립니다.
fn env_list(key: &str) -> Option<Vec<String>> {
    env::var(key).ok().map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
}

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        })
    }

    pub fn access_token_expiration_seconds() -> i64 {
        env_or("ACCESS_TOKEN_EXPIRATION_SECONDS", 3_600)
    }

    pub fn refresh_token_expiration_seconds() -> i64 {
        env_or("REFRESH_TOKEN_EXPIRATION_SECONDS", 1_209_600)
    }
}

pub struct NonceConfig;

impl NonceConfig {
    pub fn ttl_seconds() -> u64 {
        env_or("NONCE_TTL_SECONDS", 300)
    }
}

/// 외부 ID 프로바이더의 공개키/발급자/클라이언트 설정
pub struct ProviderConfig;

impl ProviderConfig {
    pub fn jwks_uri(provider: AuthProvider) -> String {
        env::var(format!("{}_JWKS_URI", provider.env_prefix()))
            .unwrap_or_else(|_| provider.default_jwks_uri().to_string())
    }

    pub fn issuers(provider: AuthProvider) -> Vec<String> {
        env_list(&format!("{}_ISSUER", provider.env_prefix())).unwrap_or_else(|| {
            provider
                .default_issuers()
                .iter()
                .map(|issuer| issuer.to_string())
                .collect()
        })
    }

    /// audience 로 검증할 클라이언트 ID 목록. 설정이 없으면 빈 목록입니다.
    pub fn client_ids(provider: AuthProvider) -> Vec<String> {
        env_list(&format!("{}_CLIENT_ID", provider.env_prefix())).unwrap_or_default()
    }

    pub fn key_cache_seconds() -> u64 {
        env_or("PUBLIC_KEY_CACHE_SECONDS", 3_600)
    }

    pub fn min_key_bits() -> usize {
        env_or("PROVIDER_MIN_KEY_BITS", 2_048)
    }

    pub fn clock_leeway_seconds() -> u64 {
        env_or("PROVIDER_CLOCK_LEEWAY_SECONDS", 60)
    }
}

/// 지원하는 외부 ID 프로바이더
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Kakao,
    Apple,
    Google,
}

impl AuthProvider {
    pub const ALL: [AuthProvider; 3] = [AuthProvider::Kakao, AuthProvider::Apple, AuthProvider::Google];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Kakao => "kakao",
            AuthProvider::Apple => "apple",
            AuthProvider::Google => "google",
        }
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            AuthProvider::Kakao => "KAKAO",
            AuthProvider::Apple => "APPLE",
            AuthProvider::Google => "GOOGLE",
        }
    }

    fn default_jwks_uri(&self) -> &'static str {
        match self {
            AuthProvider::Kakao => "https://kauth.kakao.com/.well-known/jwks.json",
            AuthProvider::Apple => "https://appleid.apple.com/auth/keys",
            AuthProvider::Google => "https://www.googleapis.com/oauth2/v3/certs",
        }
    }

    fn default_issuers(&self) -> &'static [&'static str] {
        match self {
            AuthProvider::Kakao => &["https://kauth.kakao.com"],
            AuthProvider::Apple => &["https://appleid.apple.com"],
            AuthProvider::Google => &["https://accounts.google.com", "accounts.google.com"],
        }
    }
}

impl FromStr for AuthProvider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kakao" => Ok(AuthProvider::Kakao),
            "apple" => Ok(AuthProvider::Apple),
            "google" => Ok(AuthProvider::Google),
            _ => Err(AuthError::InvalidProvider),
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 토큰 발급기 설정
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_seconds: i64,
}

impl TokenSettings {
    pub fn from_env() -> Self {
        Self {
            secret: JwtConfig::secret(),
            access_token_ttl_seconds: JwtConfig::access_token_expiration_seconds(),
            refresh_token_ttl_seconds: JwtConfig::refresh_token_expiration_seconds(),
        }
    }
}

/// 프로바이더 한 곳의 공개키 위치와 신뢰 정보
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub jwks_uri: String,
    /// 비어 있으면 issuer 검증 생략
    pub issuers: Vec<String>,
    /// 비어 있으면 audience 검증 생략
    pub audiences: Vec<String>,
}

impl ProviderSettings {
    pub fn from_env(provider: AuthProvider) -> Self {
        Self {
            jwks_uri: ProviderConfig::jwks_uri(provider),
            issuers: ProviderConfig::issuers(provider),
            audiences: ProviderConfig::client_ids(provider),
        }
    }
}

/// 프로바이더 서명 검증기 설정
#[derive(Debug, Clone)]
pub struct VerifierSettings {
    pub providers: HashMap<AuthProvider, ProviderSettings>,
    pub min_key_bits: usize,
    pub leeway_seconds: u64,
    pub key_cache_seconds: u64,
}

impl VerifierSettings {
    pub fn from_env() -> Self {
        let settings = Self {
            providers: AuthProvider::ALL
                .iter()
                .map(|provider| (*provider, ProviderSettings::from_env(*provider)))
                .collect(),
            min_key_bits: ProviderConfig::min_key_bits(),
            leeway_seconds: ProviderConfig::clock_leeway_seconds(),
            key_cache_seconds: ProviderConfig::key_cache_seconds(),
        };
        settings.warn_unchecked_audiences(&Environment::current());
        settings
    }

    /// 로컬이 아닌 환경에서 클라이언트 ID 가 없는 프로바이더를 경고하고 돌려줍니다.
    ///
    /// 이런 프로바이더는 다른 앱에 발급된 ID 토큰도 받아들입니다.
    pub fn warn_unchecked_audiences(&self, environment: &Environment) -> Vec<AuthProvider> {
        if environment.is_local() {
            return Vec::new();
        }

        let unchecked: Vec<AuthProvider> = AuthProvider::ALL
            .into_iter()
            .filter(|provider| {
                self.provider(*provider)
                    .is_some_and(|config| config.audiences.is_empty())
            })
            .collect();

        for provider in &unchecked {
            log::warn!(
                "⚠️ {} 클라이언트 ID 미설정: {}_CLIENT_ID 가 없으면 audience 를 검증하지 않습니다",
                provider,
                provider.env_prefix()
            );
        }

        unchecked
    }

    pub fn provider(&self, provider: AuthProvider) -> Option<&ProviderSettings> {
        self.providers.get(&provider)
    }
}

impl Default for VerifierSettings {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            min_key_bits: 2_048,
            leeway_seconds: 60,
            key_cache_seconds: 3_600,
        }
    }
}

/// 인증 서브시스템 전체 설정
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub token: TokenSettings,
    pub verifier: VerifierSettings,
    pub nonce_ttl_seconds: u64,
}

impl AuthSettings {
    pub fn from_env() -> Self {
        Self {
            token: TokenSettings::from_env(),
            verifier: VerifierSettings::from_env(),
            nonce_ttl_seconds: NonceConfig::ttl_seconds(),
        }
    }
}
