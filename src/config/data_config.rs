//! # Data & Server Configuration
//!
//! 실행 환경, 서버 바인딩, 저장소 백엔드 선택을 담당하는 설정 모듈입니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="development"   # development, test, staging, production
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export STORE_BACKEND="redis"       # redis | memory
//! export MEMBER_BACKEND="mongodb"    # mongodb | memory
//! ```
//!
//! `STORE_BACKEND` / `MEMBER_BACKEND` 가 비어 있으면 환경별 기본값을 사용합니다.
//! 개발/테스트 환경은 외부 인프라 없이 뜰 수 있도록 인메모리 백엔드가 기본입니다.

use std::env;

/// `PROFILE`이 없을 때 읽을 `.env` 프로필
pub const DEFAULT_PROFILE: &str = "dev";

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        Self::resolve(
            env::var("ENVIRONMENT").ok().as_deref(),
            env::var("PROFILE").ok().as_deref(),
        )
    }

    /// `ENVIRONMENT`가 없으면 `.env` 파일을 고른 `PROFILE`을 따릅니다.
    pub fn resolve(environment: Option<&str>, profile: Option<&str>) -> Self {
        Self::from_str(environment.or(profile).unwrap_or(DEFAULT_PROFILE))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

/// 만료 키-값 저장소(논스, 리프레시 토큰)의 구현 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

/// 회원 식별자 저장소의 구현 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberBackend {
    MongoDb,
    Memory,
}

pub struct StorageConfig;

impl StorageConfig {
    pub fn store_backend() -> StoreBackend {
        match env::var("STORE_BACKEND") {
            Ok(value) => Self::parse_store_backend(&value),
            Err(_) => Self::store_backend_for_env(&Environment::current()),
        }
    }

    pub fn member_backend() -> MemberBackend {
        match env::var("MEMBER_BACKEND") {
            Ok(value) => Self::parse_member_backend(&value),
            Err(_) => Self::member_backend_for_env(&Environment::current()),
        }
    }

    pub fn parse_store_backend(value: &str) -> StoreBackend {
        match value.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => StoreBackend::Memory,
            _ => StoreBackend::Redis,
        }
    }

    pub fn parse_member_backend(value: &str) -> MemberBackend {
        match value.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => MemberBackend::Memory,
            _ => MemberBackend::MongoDb,
        }
    }

    pub fn store_backend_for_env(env: &Environment) -> StoreBackend {
        if env.is_local() {
            StoreBackend::Memory
        } else {
            StoreBackend::Redis
        }
    }

    pub fn member_backend_for_env(env: &Environment) -> MemberBackend {
        if env.is_local() {
            MemberBackend::Memory
        } else {
            MemberBackend::MongoDb
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}
