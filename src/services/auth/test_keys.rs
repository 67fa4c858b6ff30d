//! 테스트용 프로바이더 서명 키
//!
//! RSA 키 생성은 느리므로 크기별로 한 번만 만들어 공유합니다.

use std::sync::OnceLock;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::Value;

use crate::domain::models::{ProviderKey, ProviderKeySet};

static PRIMARY: OnceLock<RsaPrivateKey> = OnceLock::new();
static IMPOSTOR: OnceLock<RsaPrivateKey> = OnceLock::new();

fn generate(bits: usize) -> RsaPrivateKey {
    RsaPrivateKey::new(&mut rsa::rand_core::OsRng, bits).expect("RSA 키 생성 실패")
}

/// 최소 강도 미만인 1024비트 공개키. jsonwebtoken 은 이 크기로 서명하지 않으므로 공개키만 만듭니다.
pub fn weak_public_key(kid: &str) -> ProviderKey {
    ProviderKey::from_rsa_public_key(kid, &RsaPublicKey::from(&generate(1024)))
}

pub struct ProviderSigner {
    private_key: &'static RsaPrivateKey,
    pub kid: String,
}

impl ProviderSigner {
    /// 프로바이더가 공개한 키로 서명하는 정상 서명자
    pub fn primary() -> Self {
        Self::new(PRIMARY.get_or_init(|| generate(2048)), "provider-key-1")
    }

    /// 같은 `kid`를 쓰지만 다른 개인키로 서명하는 위조 서명자
    pub fn impostor() -> Self {
        Self::new(IMPOSTOR.get_or_init(|| generate(2048)), "provider-key-1")
    }

    fn new(private_key: &'static RsaPrivateKey, kid: &str) -> Self {
        Self {
            private_key,
            kid: kid.to_string(),
        }
    }

    pub fn with_kid(mut self, kid: &str) -> Self {
        self.kid = kid.to_string();
        self
    }

    pub fn public_key(&self) -> ProviderKey {
        ProviderKey::from_rsa_public_key(&self.kid, &RsaPublicKey::from(self.private_key))
    }

    pub fn key_set(&self) -> ProviderKeySet {
        ProviderKeySet::new(vec![self.public_key()])
    }

    pub fn sign(&self, claims: &Value) -> String {
        let pem = self
            .private_key
            .to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
            .expect("PEM 인코딩 실패");
        let encoding_key = EncodingKey::from_rsa_pem(pem.as_bytes()).expect("인코딩 키 생성 실패");

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.kid.clone());

        encode(&header, claims, &encoding_key).expect("토큰 서명 실패")
    }
}
