//! 식별자 검증
//!
//! SQL에 들어가는 모든 이름은 SeaQuery가 큰따옴표로 인용합니다.
//! 그 전에 여기서 형태를 검사합니다. 이미 존재하는 테이블/컬럼은 추가로
//! 카탈로그 allow-list(`TableInfo`)와 대조합니다.

use std::sync::LazyLock;

use regex::Regex;
use sea_query::Iden;

use tk_core::{Error, Result};

/// Postgres 식별자 최대 길이 (NAMEDATALEN - 1)
pub const MAX_IDENTIFIER_LEN: usize = 63;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

static DATA_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_ ]*$").expect("valid data type regex"));

/// 동적 테이블/컬럼 식별자
#[derive(Debug, Clone)]
pub struct DynIden(pub String);

impl DynIden {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Iden for DynIden {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "{}", self.0).unwrap();
    }
}

/// 식별자 형태 검사
pub fn validate_identifier(name: &str) -> Result<&str> {
    if name.len() > MAX_IDENTIFIER_LEN || !IDENTIFIER.is_match(name) {
        return Err(Error::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    Ok(name)
}

/// 타입 이름 검사 후 `TYPE(size)` 형태로 렌더링
///
/// 타입 이름은 SQL에 그대로 들어가므로 키워드 문자만 허용합니다.
pub fn render_data_type(data_type: &str, size: Option<u32>) -> Result<String> {
    let data_type = data_type.trim();
    if data_type.len() > MAX_IDENTIFIER_LEN || !DATA_TYPE.is_match(data_type) {
        return Err(Error::InvalidDataType {
            data_type: data_type.to_string(),
        });
    }
    match size {
        Some(0) => Err(Error::InvalidDataType {
            data_type: format!("{}(0)", data_type),
        }),
        Some(size) => Ok(format!("{}({})", data_type, size)),
        None => Ok(data_type.to_string()),
    }
}

/// 카탈로그가 보고한 타입 이름(udt_name)을 CAST 대상으로 검사
pub fn cast_type(udt_name: &str) -> Result<DynIden> {
    validate_identifier(udt_name)
        .map(DynIden::new)
        .map_err(|_| Error::InvalidDataType {
            data_type: udt_name.to_string(),
        })
}

/// LIKE 패턴의 메타문자(`%`, `_`, `\`) 이스케이프
///
/// Postgres 기본 ESCAPE 문자인 `\`를 사용합니다.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
