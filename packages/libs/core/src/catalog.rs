//! 카탈로그 메타데이터
//!
//! `information_schema.columns`에서 읽은 테이블 구조입니다.
//! 요청에 들어온 컬럼 이름은 반드시 이 목록(allow-list)과 대조한 뒤 SQL에 들어갑니다.
//! 캐시하지 않고 요청마다 새로 읽습니다.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::TableName;

/// 컬럼 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// 컬럼 이름
    pub name: String,

    /// SQL 표준 타입 이름 (예: `character varying`)
    pub data_type: String,

    /// Postgres 내부 타입 이름 (예: `varchar`, `int4`). 바인딩 값 CAST에 사용
    pub udt_name: String,

    /// NULL 허용 여부
    pub nullable: bool,

    /// 테이블 내 순서 (1부터)
    pub ordinal: i32,
}

/// 테이블 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// 테이블 이름
    pub name: TableName,

    /// 컬럼 목록 (ordinal 순)
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn new(name: impl Into<TableName>, mut columns: Vec<ColumnInfo>) -> Self {
        columns.sort_by_key(|c| c.ordinal);
        Self {
            name: name.into(),
            columns,
        }
    }

    /// 컬럼 조회
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// 컬럼 존재 여부
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// 컬럼 조회 (없으면 에러)
    pub fn require_column(&self, name: &str) -> Result<&ColumnInfo> {
        self.column(name).ok_or_else(|| Error::UnknownColumn {
            table: self.name.to_string(),
            column: name.to_string(),
        })
    }

    /// 첫 번째 컬럼
    pub fn first_column(&self) -> Option<&ColumnInfo> {
        self.columns.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, udt: &str, ordinal: i32) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            data_type: udt.to_string(),
            udt_name: udt.to_string(),
            nullable: true,
            ordinal,
        }
    }

    #[test]
    fn test_columns_sorted_by_ordinal() {
        let table = TableInfo::new(
            "users",
            vec![column("name", "text", 2), column("user_id", "int4", 1)],
        );
        assert_eq!(table.first_column().unwrap().name, "user_id");
    }

    #[test]
    fn test_require_column() {
        let table = TableInfo::new("users", vec![column("user_id", "int4", 1)]);
        assert!(table.has_column("user_id"));
        assert!(table.require_column("user_id").is_ok());

        let err = table.require_column("password").unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { .. }));
        assert_eq!(
            err.to_string(),
            "column \"password\" does not exist in table users"
        );
    }
}
