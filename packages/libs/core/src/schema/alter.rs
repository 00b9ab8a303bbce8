//! 테이블 변경 명세
//!
//! ALTER TABLE 컬럼 변경과 외래키 제약 추가/삭제 요청을 정의합니다.

use serde::{Deserialize, Serialize};

use super::column::{DefaultValue, ReferentialAction};

/// 컬럼 변경 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlterAction {
    #[serde(rename = "ADD")]
    Add,

    #[serde(rename = "RENAME_COLUMN", alias = "RENAME COLUMN")]
    RenameColumn,

    #[serde(rename = "DROP_COLUMN", alias = "DROP COLUMN")]
    DropColumn,

    #[serde(rename = "MODIFY")]
    Modify,
}

/// 컬럼 변경 명세
///
/// 한 테이블에 대한 변경 목록의 한 항목입니다. 목록은 입력 순서대로 적용됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterColumnSpec {
    /// 변경 동작
    pub alter: AlterAction,

    /// 대상 컬럼 이름
    pub name: String,

    /// 새 이름 (RENAME_COLUMN)
    #[serde(default)]
    pub new_value: Option<String>,

    /// SQL 타입 이름 (ADD 필수, MODIFY 선택)
    #[serde(default)]
    pub data_type: Option<String>,

    #[serde(default)]
    pub size: Option<u32>,

    #[serde(default)]
    pub not_null: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub default_value: Option<DefaultValue>,

    #[serde(default)]
    pub primary_key: bool,
}

/// 외래키 변경 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForeignKeyAlter {
    #[serde(rename = "ADD")]
    Add,

    #[serde(rename = "DROP")]
    Drop,
}

/// 외래키 제약 변경 명세
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyChange {
    pub alter: ForeignKeyAlter,

    /// 제약을 가진 테이블
    pub table_name: String,

    /// 제약을 가진 컬럼
    pub column_name: String,

    /// 참조 대상 테이블 (ADD 필수)
    #[serde(default)]
    pub fk_table: Option<String>,

    /// 참조 대상 컬럼 (생략 시 대상 테이블의 유도된 기본 키)
    #[serde(default)]
    pub fk_column: Option<String>,

    #[serde(default)]
    pub on_delete: Option<ReferentialAction>,

    #[serde(default)]
    pub on_update: Option<ReferentialAction>,
}

impl ForeignKeyChange {
    /// 제약 이름 (`<table>_<column>_fkey`)
    ///
    /// Postgres가 이름 없는 외래키에 붙이는 기본 이름과 같습니다.
    pub fn constraint_name(&self) -> String {
        format!("{}_{}_fkey", self.table_name, self.column_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alter_action_aliases() {
        let json = r#"[
            { "alter": "ADD", "name": "age", "dataType": "INTEGER" },
            { "alter": "RENAME COLUMN", "name": "name", "newValue": "full_name" },
            { "alter": "DROP_COLUMN", "name": "nickname" },
            { "alter": "MODIFY", "name": "age", "notNull": true }
        ]"#;

        let specs: Vec<AlterColumnSpec> = serde_json::from_str(json).unwrap();
        let actions: Vec<AlterAction> = specs.iter().map(|s| s.alter).collect();
        assert_eq!(
            actions,
            vec![
                AlterAction::Add,
                AlterAction::RenameColumn,
                AlterAction::DropColumn,
                AlterAction::Modify,
            ]
        );
        assert_eq!(specs[1].new_value.as_deref(), Some("full_name"));
    }

    #[test]
    fn test_unknown_alter_action_rejected() {
        let json = r#"{ "alter": "TRUNCATE", "name": "age" }"#;
        assert!(serde_json::from_str::<AlterColumnSpec>(json).is_err());
    }

    #[test]
    fn test_constraint_name() {
        let json = r#"{
            "alter": "ADD",
            "tableName": "posts",
            "columnName": "author_id",
            "fkTable": "authors",
            "fkColumn": "author_id",
            "onDelete": "CASCADE"
        }"#;

        let change: ForeignKeyChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.alter, ForeignKeyAlter::Add);
        assert_eq!(change.constraint_name(), "posts_author_id_fkey");
        assert_eq!(change.on_delete, Some(ReferentialAction::Cascade));
    }
}
