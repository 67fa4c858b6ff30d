//! # 문자열 유틸리티
//!
//! 외부에서 들어온 식별자 문자열을 다룰 때 쓰는 공통 함수들입니다.
//! 식별자는 값 그대로 비교해야 하므로 공백을 잘라내지 않고, 비어 있는지만 판단합니다.

use serde::Deserialize;

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// 비어 있거나 공백뿐인 문자열을 `None`으로 바꿉니다. 값 자체는 수정하지 않습니다.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !is_blank(s))
}

/// 토큰 클레임처럼 "없음"과 "빈 문자열"을 같게 취급해야 하는 필드용 역직렬화기
pub fn deserialize_non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(non_blank(opt))
}
