//! 프로바이더 공개키(JWKS)와 ID 토큰 클레임 모델

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};

use crate::utils::string_utils::deserialize_non_blank;

/// JWKS 의 키 하나
///
/// RSA 가 아닌 키(EC 등)도 집합 전체를 거부하지 않도록 `n`/`e`는 비어 있을 수 있습니다.
/// 그런 키가 선택되면 검증기가 `InvalidPublicKey`로 거부합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderKey {
    pub kty: String,
    pub kid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    #[serde(default)]
    pub n: String,
    #[serde(default)]
    pub e: String,
}

impl ProviderKey {
    /// RSA 공개키를 JWKS 표현으로 변환합니다.
    pub fn from_rsa_public_key(kid: &str, public_key: &RsaPublicKey) -> Self {
        Self {
            kty: "RSA".to_string(),
            kid: kid.to_string(),
            alg: Some("RS256".to_string()),
            key_use: Some("sig".to_string()),
            n: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderKeySet {
    pub keys: Vec<ProviderKey>,
}

impl ProviderKeySet {
    pub fn new(keys: Vec<ProviderKey>) -> Self {
        Self { keys }
    }

    pub fn find(&self, kid: &str) -> Option<&ProviderKey> {
        self.keys.iter().find(|key| key.kid == kid)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 프로바이더 ID 토큰에서 읽는 클레임
///
/// `exp`/`iss`/`aud`는 `jsonwebtoken` 검증 단계에서 확인하므로 여기서는 다루지 않습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderAssertionClaims {
    #[serde(default, deserialize_with = "deserialize_non_blank")]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_blank")]
    pub nonce: Option<String>,
}

/// 검증을 통과한 프로바이더 신원
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub provider_user_id: String,
    pub nonce: String,
}
