//! 프로바이더 공개키 소스
//!
//! 검증기는 [`PublicKeySource`]를 통해 프로바이더의 JWKS 를 얻습니다.
//!
//! - [`JwksPublicKeySource`]: 프로바이더별 JWKS URI 에서 키 집합을 받아 TTL 동안 캐시합니다.
//!   `kid`를 찾지 못하면 검증기가 `refresh_public_keys`로 한 번 강제 갱신을 요청합니다.
//!   무작위 `kid`로 강제 갱신을 남발하지 못하도록 최근에 받은 집합은 재사용합니다.
//! - [`StaticPublicKeySource`]: 고정된 키 집합. 테스트와 오프라인 실행용입니다.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::config::{AuthProvider, VerifierSettings};
use crate::domain::models::ProviderKeySet;
use crate::errors::{AppResult, AuthError, ErrorContext};

/// 강제 갱신 사이 최소 간격
const MIN_FORCED_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait PublicKeySource: Send + Sync {
    async fn get_public_keys(&self, provider: AuthProvider) -> AppResult<ProviderKeySet>;

    /// 캐시를 건너뛰고 최신 키 집합을 받습니다. 기본 구현은 `get_public_keys`와 같습니다.
    async fn refresh_public_keys(&self, provider: AuthProvider) -> AppResult<ProviderKeySet> {
        self.get_public_keys(provider).await
    }
}

/// JWKS 문서를 실제로 가져오는 부분
#[async_trait]
pub trait KeySetFetcher: Send + Sync {
    async fn fetch(&self, jwks_uri: &str) -> AppResult<ProviderKeySet>;
}

pub struct HttpKeySetFetcher {
    client: reqwest::Client,
}

impl HttpKeySetFetcher {
    pub fn new() -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl KeySetFetcher for HttpKeySetFetcher {
    async fn fetch(&self, jwks_uri: &str) -> AppResult<ProviderKeySet> {
        let response = self.client.get(jwks_uri).send().await.map_err(|e| {
            log::error!("JWKS 요청 실패 ({}): {}", jwks_uri, e);
            AuthError::PublicKeyNotFound
        })?;

        if !response.status().is_success() {
            log::error!("JWKS 응답 오류 ({}): {}", jwks_uri, response.status());
            return Err(AuthError::PublicKeyNotFound.into());
        }

        response.json::<ProviderKeySet>().await.map_err(|e| {
            log::error!("JWKS 파싱 실패 ({}): {}", jwks_uri, e);
            AuthError::InvalidPublicKey.into()
        })
    }
}

struct CachedKeySet {
    keys: ProviderKeySet,
    fetched_at: Instant,
}

pub struct JwksPublicKeySource {
    fetcher: Arc<dyn KeySetFetcher>,
    jwks_uris: HashMap<AuthProvider, String>,
    cache: RwLock<HashMap<AuthProvider, CachedKeySet>>,
    ttl: Duration,
}

impl JwksPublicKeySource {
    pub fn new(
        fetcher: Arc<dyn KeySetFetcher>,
        jwks_uris: HashMap<AuthProvider, String>,
        ttl: Duration,
    ) -> Self {
        Self {
            fetcher,
            jwks_uris,
            cache: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// 검증기 설정의 JWKS URI 와 캐시 TTL 로 HTTP 소스를 만듭니다.
    pub fn from_settings(settings: &VerifierSettings) -> AppResult<Self> {
        let jwks_uris = settings
            .providers
            .iter()
            .map(|(provider, config)| (*provider, config.jwks_uri.clone()))
            .collect();

        Ok(Self::new(
            Arc::new(HttpKeySetFetcher::new()?),
            jwks_uris,
            Duration::from_secs(settings.key_cache_seconds),
        ))
    }

    async fn cached(&self, provider: AuthProvider, max_age: Duration) -> Option<ProviderKeySet> {
        let cache = self.cache.read().await;
        cache
            .get(&provider)
            .filter(|entry| entry.fetched_at.elapsed() < max_age)
            .map(|entry| entry.keys.clone())
    }

    async fn fetch_and_store(&self, provider: AuthProvider) -> AppResult<ProviderKeySet> {
        let jwks_uri = self.jwks_uris.get(&provider).ok_or_else(|| {
            log::error!("{} JWKS URI 가 설정되지 않았습니다", provider);
            AuthError::PublicKeyNotFound
        })?;

        let keys = self.fetcher.fetch(jwks_uri).await?;
        log::info!("🔑 {} 공개키 {}개 로드", provider, keys.keys.len());

        let mut cache = self.cache.write().await;
        cache.insert(
            provider,
            CachedKeySet {
                keys: keys.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(keys)
    }
}

#[async_trait]
impl PublicKeySource for JwksPublicKeySource {
    async fn get_public_keys(&self, provider: AuthProvider) -> AppResult<ProviderKeySet> {
        if let Some(keys) = self.cached(provider, self.ttl).await {
            return Ok(keys);
        }
        self.fetch_and_store(provider).await
    }

    async fn refresh_public_keys(&self, provider: AuthProvider) -> AppResult<ProviderKeySet> {
        if let Some(keys) = self.cached(provider, MIN_FORCED_REFRESH_INTERVAL).await {
            return Ok(keys);
        }
        self.fetch_and_store(provider).await
    }
}

/// 고정 키 집합 소스
#[derive(Default)]
pub struct StaticPublicKeySource {
    keys: HashMap<AuthProvider, ProviderKeySet>,
}

impl StaticPublicKeySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(mut self, provider: AuthProvider, keys: ProviderKeySet) -> Self {
        self.keys.insert(provider, keys);
        self
    }
}

#[async_trait]
impl PublicKeySource for StaticPublicKeySource {
    async fn get_public_keys(&self, provider: AuthProvider) -> AppResult<ProviderKeySet> {
        self.keys
            .get(&provider)
            .cloned()
            .ok_or_else(|| AuthError::PublicKeyNotFound.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ProviderKey;
    use actix_web::dev::ServerHandle;
    use actix_web::http::StatusCode;
    use actix_web::{web, App, HttpResponse, HttpServer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl KeySetFetcher for CountingFetcher {
        async fn fetch(&self, _jwks_uri: &str) -> AppResult<ProviderKeySet> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ProviderKeySet::new(vec![ProviderKey {
                kty: "RSA".to_string(),
                kid: format!("kid-{}", call),
                alg: None,
                key_use: None,
                n: String::new(),
                e: String::new(),
            }]))
        }
    }

    fn source() -> (JwksPublicKeySource, Arc<CountingFetcher>) {
        let fetcher = Arc::new(CountingFetcher { calls: AtomicUsize::new(0) });
        let uris = HashMap::from([(AuthProvider::Kakao, "https://example.invalid/jwks".to_string())]);
        let source = JwksPublicKeySource::new(fetcher.clone(), uris, Duration::from_secs(3_600));
        (source, fetcher)
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_is_reused_within_ttl() {
        let (source, fetcher) = source();

        let first = source.get_public_keys(AuthProvider::Kakao).await.unwrap();
        tokio::time::advance(Duration::from_secs(3_599)).await;
        let second = source.get_public_keys(AuthProvider::Kakao).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        let third = source.get_public_keys(AuthProvider::Kakao).await.unwrap();
        assert!(third.find("kid-1").is_some());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_forced_refresh_is_throttled() {
        let (source, fetcher) = source();
        source.get_public_keys(AuthProvider::Kakao).await.unwrap();

        source.refresh_public_keys(AuthProvider::Kakao).await.unwrap();
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(MIN_FORCED_REFRESH_INTERVAL).await;
        let refreshed = source.refresh_public_keys(AuthProvider::Kakao).await.unwrap();
        assert!(refreshed.find("kid-1").is_some());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_has_no_keys() {
        let (source, _) = source();
        let err = source.get_public_keys(AuthProvider::Apple).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(AuthError::PublicKeyNotFound));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticPublicKeySource::new()
            .with_keys(AuthProvider::Google, ProviderKeySet::default());

        assert!(source.get_public_keys(AuthProvider::Google).await.unwrap().is_empty());
        assert_eq!(
            source.get_public_keys(AuthProvider::Kakao).await.unwrap_err().auth_kind(),
            Some(AuthError::PublicKeyNotFound)
        );
    }

    /// 모든 경로에 같은 응답을 돌려주는 로컬 JWKS 서버
    fn serve_jwks(status: StatusCode, body: &'static str) -> (String, ServerHandle) {
        let server = HttpServer::new(move || {
            App::new().default_service(web::to(move || async move {
                HttpResponse::build(status).content_type("application/json").body(body)
            }))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        (format!("http://{}/jwks", addr), handle)
    }

    async fn fetch_err(jwks_uri: &str) -> Option<AuthError> {
        HttpKeySetFetcher::new()
            .unwrap()
            .fetch(jwks_uri)
            .await
            .unwrap_err()
            .auth_kind()
    }

    #[actix_web::test]
    async fn test_unreachable_jwks_is_public_key_not_found() {
        assert_eq!(fetch_err("http://127.0.0.1:1/").await, Some(AuthError::PublicKeyNotFound));
    }

    #[actix_web::test]
    async fn test_unparsable_jwks_is_invalid_public_key() {
        let (uri, handle) = serve_jwks(StatusCode::OK, "<html>not json</html>");

        assert_eq!(fetch_err(&uri).await, Some(AuthError::InvalidPublicKey));
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_jwks_error_status_is_public_key_not_found() {
        let (uri, handle) = serve_jwks(StatusCode::SERVICE_UNAVAILABLE, r#"{"keys":[]}"#);

        assert_eq!(fetch_err(&uri).await, Some(AuthError::PublicKeyNotFound));
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn test_http_fetcher_parses_key_set() {
        let (uri, handle) = serve_jwks(
            StatusCode::OK,
            r#"{"keys":[{"kty":"RSA","kid":"k1","alg":"RS256","use":"sig","n":"AQAB","e":"AQAB"}]}"#,
        );

        let keys = HttpKeySetFetcher::new().unwrap().fetch(&uri).await.unwrap();
        assert!(keys.find("k1").is_some());
        handle.stop(false).await;
    }
}
