//! 테이블 이름 규칙
//!
//! 테이블 이름은 복수형(`users`)을 쓰고, 단수형(`user`)에 `_id`를 붙인 이름을
//! 기본 키 이름으로 유도합니다. 이 유도는 순수하게 문자열 규칙이며 실제 스키마를
//! 보장하지 않습니다. 정렬 기본값 같은 fallback 용도로만 사용합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 테이블 이름
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 단수형 (끝의 `s` 하나 제거)
    pub fn singular(&self) -> &str {
        self.0.strip_suffix('s').unwrap_or(&self.0)
    }

    /// 복수형 (이미 `s`로 끝나면 그대로)
    pub fn plural(&self) -> TableName {
        TableName(format!("{}s", self.singular()))
    }

    /// 유도된 기본 키 이름 (`<단수형>_id`)
    pub fn derived_key(&self) -> String {
        format!("{}_id", self.singular())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
