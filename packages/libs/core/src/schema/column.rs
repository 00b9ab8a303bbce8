//! 컬럼 명세
//!
//! CREATE TABLE 요청의 컬럼 정의입니다.

use serde::{Deserialize, Serialize};

/// 컬럼 명세
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// 컬럼 이름
    pub name: String,

    /// SQL 타입 이름 (예: `VARCHAR`, `INTEGER`, `timestamptz`)
    pub data_type: String,

    /// 타입 크기 (예: `VARCHAR(255)`의 255)
    #[serde(default)]
    pub size: Option<u32>,

    /// NOT NULL 제약
    #[serde(default)]
    pub not_null: bool,

    /// 유니크 제약
    #[serde(default)]
    pub unique: bool,

    /// 기본값 (리터럴)
    #[serde(default)]
    pub default_value: Option<DefaultValue>,

    /// 기본 키 여부
    #[serde(default)]
    pub primary_key: bool,

    /// 외래키 참조
    #[serde(default)]
    pub foreign_key: Option<ForeignKeySpec>,
}

/// 기본값 리터럴
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// 외래키 참조 정의
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeySpec {
    /// 참조 대상 테이블
    pub table: String,

    /// 참조 대상 컬럼 (생략 시 대상 테이블의 유도된 기본 키)
    #[serde(default)]
    pub column: Option<String>,

    /// 참조 대상 삭제 시 동작
    #[serde(default)]
    pub on_delete: Option<ReferentialAction>,

    /// 참조 대상 갱신 시 동작
    #[serde(default)]
    pub on_update: Option<ReferentialAction>,
}

/// 참조 무결성 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// 함께 삭제/갱신
    #[serde(rename = "CASCADE", alias = "cascade")]
    Cascade,

    /// 참조 위반 시 거부
    #[serde(rename = "RESTRICT", alias = "restrict")]
    Restrict,

    /// NULL로 설정
    #[serde(rename = "SET NULL", alias = "set_null")]
    SetNull,

    /// 기본값으로 설정
    #[serde(rename = "SET DEFAULT", alias = "set_default")]
    SetDefault,

    /// 아무 동작 없음 (DB가 나중에 체크)
    #[serde(rename = "NO ACTION", alias = "no_action")]
    NoAction,
}
