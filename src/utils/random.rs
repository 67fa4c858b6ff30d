//! 예측 불가능한 토큰 값 생성
//!
//! 논스와 리프레시 토큰 값은 OS CSPRNG 에서 뽑은 32바이트를
//! base64url(패딩 없음)으로 인코딩한 43자 문자열입니다.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;

pub const TOKEN_BYTES: usize = 32;

pub fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
