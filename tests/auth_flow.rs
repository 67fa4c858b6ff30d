//! HTTP 통합 테스트
//!
//! 인메모리 저장소와 고정 공개키 소스로 전체 서비스 그래프를 조립하고
//! 실제 라우트를 통해 로그인, 갱신, 로그아웃 흐름을 확인합니다.

use std::sync::{Arc, OnceLock};

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{test, App};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::{json, Value};

use oauth_session_backend::caching::MemoryStore;
use oauth_session_backend::config::{AuthProvider, AuthSettings, TokenSettings, VerifierSettings};
use oauth_session_backend::core::ServiceRegistry;
use oauth_session_backend::domain::{AuthResult, ProviderKey, ProviderKeySet};
use oauth_session_backend::repositories::MemoryMemberDirectory;
use oauth_session_backend::routes::configure_all_routes;
use oauth_session_backend::services::auth::StaticPublicKeySource;

const KID: &str = "kakao-test-key";

fn provider_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048).expect("RSA 키 생성 실패"))
}

fn sign_assertion(sub: &str, nonce: &str) -> String {
    let pem = provider_key().to_pkcs1_pem(LineEnding::LF).expect("PEM 인코딩 실패");
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).expect("인코딩 키 생성 실패");

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(KID.to_string());

    let now = Utc::now().timestamp();
    let claims = json!({ "sub": sub, "nonce": nonce, "iat": now, "exp": now + 600 });
    encode(&header, &claims, &key).expect("토큰 서명 실패")
}

fn registry(access_ttl: i64) -> ServiceRegistry {
    let public_key = ProviderKey::from_rsa_public_key(KID, &RsaPublicKey::from(provider_key()));
    let key_source = StaticPublicKeySource::new()
        .with_keys(AuthProvider::Kakao, ProviderKeySet::new(vec![public_key]));

    let settings = AuthSettings {
        token: TokenSettings {
            secret: "integration-secret".to_string(),
            access_token_ttl_seconds: access_ttl,
            refresh_token_ttl_seconds: 1_209_600,
        },
        verifier: VerifierSettings::default(),
        nonce_ttl_seconds: 300,
    };

    ServiceRegistry::assemble(
        Arc::new(MemoryStore::new()),
        Arc::new(key_source),
        Arc::new(MemoryMemberDirectory::starting_at(42)),
        &settings,
    )
}

macro_rules! app {
    ($registry:expr) => {{
        let registry = $registry.clone();
        test::init_service(
            App::new()
                .configure(move |cfg| registry.register(cfg))
                .configure(configure_all_routes),
        )
        .await
    }};
}

async fn json_body<B: MessageBody>(res: ServiceResponse<B>) -> Value {
    serde_json::from_slice(&test::read_body(res).await).expect("JSON 응답")
}

macro_rules! post {
    ($uri:expr, $body:expr $(,)?) => {
        test::TestRequest::post().uri($uri).set_json($body).to_request()
    };
}

#[actix_web::test]
async fn test_health_check() {
    let app = app!(registry(3_600));

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["status"], "healthy");
}

#[actix_web::test]
async fn test_kakao_sign_in_then_early_refresh() {
    let registry = registry(3_600);
    let app = app!(registry);

    let res = test::call_service(&app, post!("/api/v1/auth/nonce", json!({ "provider": "kakao" }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let nonce = json_body(res).await["nonce"].as_str().unwrap().to_string();
    assert_eq!(nonce.len(), 43);

    let res = test::call_service(
        &app,
        post!(
            "/api/v1/auth/sign-in",
            json!({ "provider": "kakao", "signedAssertion": sign_assertion("999", &nonce) }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let session: AuthResult = serde_json::from_value(json_body(res).await).unwrap();

    assert_eq!(session.token_type, "Bearer");
    assert_eq!(session.access_token_expires_in, 3_600);
    assert_eq!(session.refresh_token_expires_in, 1_209_600);
    let claims = registry
        .token_service
        .verify_access_token(&session.access_token)
        .unwrap();
    assert_eq!(claims.member_id, 42);

    let res = test::call_service(
        &app,
        post!(
            "/api/v1/auth/refresh",
            json!({ "accessToken": session.access_token, "refreshToken": session.refresh_token }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["code"], "AUTH_NOT_EXPIRED_TOKEN");
}

#[actix_web::test]
async fn test_refresh_after_expiry_rotates_tokens() {
    let app = app!(registry(0));

    let res = test::call_service(&app, post!("/api/v1/auth/nonce", json!({ "provider": "kakao" }))).await;
    let nonce = json_body(res).await["nonce"].as_str().unwrap().to_string();
    let res = test::call_service(
        &app,
        post!(
            "/api/v1/auth/sign-in",
            json!({ "provider": "kakao", "signedAssertion": sign_assertion("999", &nonce) }),
        ),
    )
    .await;
    let session: AuthResult = serde_json::from_value(json_body(res).await).unwrap();

    let refresh = |refresh_token: &str| {
        post!(
            "/api/v1/auth/refresh",
            json!({ "accessToken": session.access_token, "refreshToken": refresh_token }),
        )
    };

    let res = test::call_service(&app, refresh(&session.refresh_token)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let rotated: AuthResult = serde_json::from_value(json_body(res).await).unwrap();
    assert_ne!(rotated.refresh_token, session.refresh_token);

    let res = test::call_service(&app, refresh(&session.refresh_token)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await["code"], "AUTH_UNAUTHORIZED_ACCESS");
}

#[actix_web::test]
async fn test_sign_in_rejections() {
    let app = app!(registry(3_600));

    let res = test::call_service(
        &app,
        post!(
            "/api/v1/auth/sign-in",
            json!({ "provider": "kakao", "signedAssertion": sign_assertion("999", "never-issued") }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await["code"], "AUTH_INVALID_NONCE");

    let res = test::call_service(
        &app,
        post!("/api/v1/auth/sign-in", json!({ "provider": "naver", "signedAssertion": "a.b.c" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["code"], "AUTH_INVALID_PROVIDER");

    let res = test::call_service(
        &app,
        post!("/api/v1/auth/sign-in", json!({ "provider": "kakao", "signedAssertion": "garbage" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["code"], "AUTH_MALFORMED_TOKEN");
}

#[actix_web::test]
async fn test_malformed_json_body_uses_error_shape() {
    let app = app!(registry(3_600));

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/nonce")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn test_sign_out_requires_bearer_and_is_idempotent() {
    let registry = registry(3_600);
    let app = app!(registry);
    let session = registry.token_service.issue_pair(42).await.unwrap();

    let res = test::call_service(&app, test::TestRequest::post().uri("/api/v1/auth/sign-out").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await["code"], "AUTH_INVALID_TOKEN");

    let sign_out = || {
        test::TestRequest::post()
            .uri("/api/v1/auth/sign-out")
            .insert_header(("Authorization", format!("Bearer {}", session.access_token)))
            .to_request()
    };

    let res = test::call_service(&app, sign_out()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["success"], true);

    // 이미 폐기된 뒤에도 성공
    let res = test::call_service(&app, sign_out()).await;
    assert_eq!(res.status(), StatusCode::OK);
}
