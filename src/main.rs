//! 소셜 로그인 세션 백엔드 메인 애플리케이션
//!
//! 저장소 백엔드를 고르고 서비스 그래프를 조립한 뒤 Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use oauth_session_backend::caching::redis::RedisClient;
use oauth_session_backend::caching::{ExpiringStore, MemoryStore};
use oauth_session_backend::config::{
    AuthSettings, MemberBackend, ServerConfig, StorageConfig, StoreBackend, DEFAULT_PROFILE,
};
use oauth_session_backend::core::ServiceRegistry;
use oauth_session_backend::db::Database;
use oauth_session_backend::errors::AppError;
use oauth_session_backend::repositories::{MemberRepository, MemberResolver, MemoryMemberDirectory};
use oauth_session_backend::routes::configure_all_routes;
use oauth_session_backend::services::auth::JwksPublicKeySource;

/// 인메모리 저장소 만료 항목 정리 주기
const REAPER_INTERVAL: Duration = Duration::from_secs(60);

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 소셜 로그인 세션 서비스 시작중...");

    let registry = assemble_services().await.map_err(|e| {
        error!("서비스 초기화 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(registry).await
}

/// 설정을 읽고 저장소 백엔드를 연결해 서비스 그래프를 만듭니다.
async fn assemble_services() -> Result<ServiceRegistry, AppError> {
    let settings = AuthSettings::from_env();

    let store = initialize_store().await?;
    let members = initialize_member_directory().await?;
    let key_source = Arc::new(JwksPublicKeySource::from_settings(&settings.verifier)?);

    Ok(ServiceRegistry::assemble(store, key_source, members, &settings))
}

/// 논스/리프레시 토큰용 만료 저장소를 연결합니다.
///
/// `STORE_BACKEND=memory`이거나 로컬 환경이면 인메모리 저장소를 사용합니다.
async fn initialize_store() -> Result<Arc<dyn ExpiringStore>, AppError> {
    match StorageConfig::store_backend() {
        StoreBackend::Redis => {
            info!("📡 Redis 연결 중...");
            let client = RedisClient::new().await?;
            Ok(Arc::new(client))
        }
        StoreBackend::Memory => {
            info!("🧠 인메모리 만료 저장소 사용 (프로세스 재시작 시 세션 소실)");
            let store = MemoryStore::new();
            store.spawn_reaper(REAPER_INTERVAL);
            Ok(Arc::new(store))
        }
    }
}

/// 회원 디렉터리를 연결합니다.
async fn initialize_member_directory() -> Result<Arc<dyn MemberResolver>, AppError> {
    match StorageConfig::member_backend() {
        MemberBackend::MongoDb => {
            info!("📡 MongoDB 연결 중...");
            let database = Arc::new(Database::new().await?);
            let repository = MemberRepository::new(database);
            repository.create_indexes().await?;
            info!("✅ MongoDB 연결 성공");
            Ok(Arc::new(repository))
        }
        MemberBackend::Memory => {
            info!("🧠 인메모리 회원 디렉터리 사용");
            Ok(Arc::new(MemoryMemberDirectory::new()))
        }
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 접근 로그, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(registry: ServiceRegistry) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let registry = registry.clone();

        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(move |cfg| registry.register(cfg))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| DEFAULT_PROFILE.to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ()),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ()),
        _ => dotenv().map(|_| ()),
    };

    // 로거 초기화 전이므로 표준 에러로 남깁니다
    if let Err(e) = loaded {
        eprintln!("[{}] 환경 파일 로드 실패: {}", profile, e);
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// 모바일 클라이언트가 주 사용자이므로 웹 개발 서버 Origin 만 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
