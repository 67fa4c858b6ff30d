//! 프로바이더 ID 토큰 검증기
//!
//! kakao, apple, google 이 발급한 OpenID Connect ID 토큰(RS256)을 검증하고
//! 프로바이더 사용자 ID(`sub`)와 포함된 논스(`nonce`)를 꺼냅니다.
//!
//! ## 검증 순서
//!
//! 1. 헤더 파싱 (`MalformedToken`), 알고리즘 RS256 확인 (`UnsupportedToken`)
//! 2. `kid`로 공개키 조회. 없으면 키 집합을 한 번 강제 갱신 (`PublicKeyNotFound`)
//! 3. 공개키 점검: RSA 여부, 모듈러스/지수 디코딩 (`InvalidPublicKey`), 최소 비트 수 (`WeakTokenKey`)
//! 4. 서명, 만료(허용 오차 포함), 설정된 경우 issuer/audience 검증
//! 5. `sub` (`InvalidProviderId`), `nonce` (`InvalidNonce`) 추출
//!
//! 논스 소비와 프로바이더 일치 확인은 로그인 서비스가 이어서 수행합니다.

use std::sync::Arc;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};

use super::public_keys::PublicKeySource;
use crate::config::{AuthProvider, VerifierSettings};
use crate::domain::models::{ProviderAssertionClaims, ProviderKey, VerifiedIdentity};
use crate::errors::{AppResult, AuthError};

/// JWKS 의 `n`/`e`는 패딩 없는 base64url 이 표준이지만 패딩을 붙이는 구현도 허용합니다.
const JWK_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub struct ProviderVerifier {
    key_source: Arc<dyn PublicKeySource>,
    settings: VerifierSettings,
}

impl ProviderVerifier {
    pub fn new(key_source: Arc<dyn PublicKeySource>, settings: VerifierSettings) -> Self {
        Self { key_source, settings }
    }

    pub async fn verify(&self, provider: AuthProvider, assertion: &str) -> AppResult<VerifiedIdentity> {
        let header = decode_header(assertion).map_err(|_| AuthError::MalformedToken)?;

        if header.alg != Algorithm::RS256 {
            log::warn!("{} 토큰 알고리즘 거부: {:?}", provider, header.alg);
            return Err(AuthError::UnsupportedToken.into());
        }

        let kid = header.kid.ok_or(AuthError::PublicKeyNotFound)?;
        let key = self.resolve_key(provider, &kid).await?;
        let decoding_key = self.decoding_key(provider, &key)?;

        let claims = decode::<ProviderAssertionClaims>(assertion, &decoding_key, &self.validation(provider))
            .map_err(|e| {
                let err = AuthError::from(e);
                log::warn!("{} 토큰 검증 실패: {}", provider, err.code());
                err
            })?
            .claims;

        let provider_user_id = claims.sub.ok_or(AuthError::InvalidProviderId)?;
        let nonce = claims.nonce.ok_or(AuthError::InvalidNonce)?;

        Ok(VerifiedIdentity { provider_user_id, nonce })
    }

    /// `kid`에 해당하는 키를 찾습니다. 프로바이더 키 회전을 따라가기 위해 한 번 강제 갱신합니다.
    async fn resolve_key(&self, provider: AuthProvider, kid: &str) -> AppResult<ProviderKey> {
        let keys = self.key_source.get_public_keys(provider).await?;
        if let Some(key) = keys.find(kid) {
            return Ok(key.clone());
        }

        log::info!("{} 키 집합에 kid={} 없음, 키 갱신 시도", provider, kid);
        let keys = self.key_source.refresh_public_keys(provider).await?;
        keys.find(kid).cloned().ok_or_else(|| {
            log::warn!("{} 공개키를 찾을 수 없음: kid={}", provider, kid);
            AuthError::PublicKeyNotFound.into()
        })
    }

    fn decoding_key(&self, provider: AuthProvider, key: &ProviderKey) -> Result<DecodingKey, AuthError> {
        if key.kty != "RSA" {
            return Err(AuthError::InvalidPublicKey);
        }
        if let Some(alg) = key.alg.as_deref() {
            if alg != "RS256" {
                return Err(AuthError::UnsupportedToken);
            }
        }

        let modulus = JWK_BASE64.decode(&key.n).map_err(|_| AuthError::InvalidPublicKey)?;
        let exponent = JWK_BASE64.decode(&key.e).map_err(|_| AuthError::InvalidPublicKey)?;

        let public_key = RsaPublicKey::new(
            BigUint::from_bytes_be(&modulus),
            BigUint::from_bytes_be(&exponent),
        )
        .map_err(|_| AuthError::InvalidPublicKey)?;

        let bits = public_key.n().bits();
        if bits < self.settings.min_key_bits {
            log::error!(
                "❌ {} 공개키 강도 부족: kid={}, {}비트 (최소 {}비트)",
                provider,
                key.kid,
                bits,
                self.settings.min_key_bits
            );
            return Err(AuthError::WeakTokenKey);
        }

        Ok(DecodingKey::from_rsa_raw_components(
            &public_key.n().to_bytes_be(),
            &public_key.e().to_bytes_be(),
        ))
    }

    fn validation(&self, provider: AuthProvider) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = self.settings.leeway_seconds;
        validation.validate_aud = false;

        if let Some(config) = self.settings.provider(provider) {
            if !config.issuers.is_empty() {
                validation.set_issuer(config.issuers.as_slice());
            }
            if !config.audiences.is_empty() {
                validation.set_audience(config.audiences.as_slice());
                validation.validate_aud = true;
            }
        }

        validation
    }
}
