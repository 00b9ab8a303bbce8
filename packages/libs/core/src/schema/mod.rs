//! 요청으로 전달되는 스키마 명세
//!
//! # 개요
//!
//! Tablekit은 컴파일 타임 스키마 없이 런타임에 받은 테이블 이름과 명세로 동작합니다.
//! 이 모듈은 그 명세들의 타입을 정의합니다.
//!
//! # 모듈 구조
//!
//! - `table_name`: 복수형/단수형 테이블 이름 규칙과 기본 키 이름 유도
//! - `column`: CREATE TABLE 용 컬럼 명세
//! - `alter`: ALTER TABLE 용 컬럼 변경 명세와 외래키 변경 명세
//! - `join`: 조인 명세

mod alter;
mod column;
mod join;
mod table_name;

pub use alter::{AlterAction, AlterColumnSpec, ForeignKeyAlter, ForeignKeyChange};
pub use column::{ColumnSpec, DefaultValue, ForeignKeySpec, ReferentialAction};
pub use join::JoinSpec;
pub use table_name::TableName;
