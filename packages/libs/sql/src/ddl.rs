//! DDL 생성기
//!
//! 요청 명세를 CREATE/ALTER/DROP TABLE과 외래키 제약 SQL로 변환합니다.
//! 이름과 타입의 형태만 검사합니다. 테이블/컬럼이 실제로 있는지는
//! 실행 시 DB가 판단합니다.

use std::collections::HashSet;

use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, ForeignKeyCreateStatement, PostgresQueryBuilder,
    Table, Value,
};

use tk_core::schema::{
    AlterAction, AlterColumnSpec, ColumnSpec, DefaultValue, ForeignKeyAlter, ForeignKeyChange,
    ForeignKeySpec, ReferentialAction, TableName,
};
use tk_core::{Error, Result};

use crate::ident::{render_data_type, validate_identifier, DynIden};

/// 자동 생성 기본 키 타입
const GENERATED_KEY_TYPE: &str = "SERIAL";

pub struct DdlGenerator;

impl DdlGenerator {
    /// CREATE TABLE
    ///
    /// 이름을 복수형으로 정규화하고 `<단수형>_id SERIAL PRIMARY KEY` 컬럼을 맨 앞에 추가합니다.
    /// 실제로 생성될 테이블 이름과 SQL을 반환합니다.
    pub fn create_table(raw_name: &str, columns: &[ColumnSpec]) -> Result<(TableName, String)> {
        let table = TableName::new(raw_name.trim()).plural();
        validate_identifier(table.as_str())?;

        let key = table.derived_key();
        validate_identifier(&key)?;

        let mut stmt = Table::create();
        stmt.table(DynIden::new(table.as_str()));

        let mut key_col = ColumnDef::new(DynIden::new(&key));
        key_col.custom(DynIden::new(GENERATED_KEY_TYPE)).primary_key();
        stmt.col(&mut key_col);

        let mut seen = HashSet::from([key]);
        for column in columns {
            validate_identifier(&column.name)?;
            if !seen.insert(column.name.clone()) {
                return Err(Error::DuplicateColumn {
                    table: table.to_string(),
                    column: column.name.clone(),
                });
            }

            let mut col_def = column_def(
                &column.name,
                Some(render_data_type(&column.data_type, column.size)?),
                column.not_null,
                column.unique,
                column.default_value.as_ref(),
                column.primary_key,
            );
            stmt.col(&mut col_def);

            if let Some(fk) = &column.foreign_key {
                let mut fk_stmt = Self::inline_foreign_key(table.as_str(), &column.name, fk)?;
                stmt.foreign_key(&mut fk_stmt);
            }
        }

        Ok((table, stmt.to_string(PostgresQueryBuilder)))
    }

    fn inline_foreign_key(
        table: &str,
        column: &str,
        fk: &ForeignKeySpec,
    ) -> Result<ForeignKeyCreateStatement> {
        validate_identifier(&fk.table)?;
        let target_column = match &fk.column {
            Some(c) => c.clone(),
            None => TableName::new(fk.table.as_str()).derived_key(),
        };
        validate_identifier(&target_column)?;

        let mut fk_stmt = ForeignKey::create();
        fk_stmt
            .name(format!("{}_{}_fkey", table, column))
            .from(DynIden::new(table), DynIden::new(column))
            .to(DynIden::new(&fk.table), DynIden::new(target_column));
        apply_actions(&mut fk_stmt, fk.on_delete, fk.on_update);
        Ok(fk_stmt)
    }

    /// ALTER TABLE (명세 하나당 statement 하나, 입력 순서)
    pub fn alter_table(table: &str, alterations: &[AlterColumnSpec]) -> Result<Vec<String>> {
        validate_identifier(table)?;
        if alterations.is_empty() {
            return Err(Error::EmptyAlteration {
                table: table.to_string(),
            });
        }

        alterations
            .iter()
            .map(|spec| Self::alter_column(table, spec))
            .collect()
    }

    fn alter_column(table: &str, spec: &AlterColumnSpec) -> Result<String> {
        validate_identifier(&spec.name)?;

        let invalid = |reason: &str| Error::InvalidAlteration {
            column: spec.name.clone(),
            reason: reason.to_string(),
        };

        let mut stmt = Table::alter();
        stmt.table(DynIden::new(table));

        match spec.alter {
            AlterAction::Add => {
                let data_type = spec
                    .data_type
                    .as_deref()
                    .ok_or_else(|| invalid("ADD requires dataType"))?;
                let mut col_def = column_def(
                    &spec.name,
                    Some(render_data_type(data_type, spec.size)?),
                    spec.not_null,
                    spec.unique,
                    spec.default_value.as_ref(),
                    spec.primary_key,
                );
                stmt.add_column(&mut col_def);
            }
            AlterAction::RenameColumn => {
                let new_name = spec
                    .new_value
                    .as_deref()
                    .ok_or_else(|| invalid("RENAME_COLUMN requires newValue"))?;
                validate_identifier(new_name)?;
                stmt.rename_column(DynIden::new(&spec.name), DynIden::new(new_name));
            }
            AlterAction::DropColumn => {
                stmt.drop_column(DynIden::new(&spec.name));
            }
            AlterAction::Modify => {
                let data_type = spec
                    .data_type
                    .as_deref()
                    .map(|t| render_data_type(t, spec.size))
                    .transpose()?;
                if data_type.is_none()
                    && !spec.not_null
                    && !spec.unique
                    && spec.default_value.is_none()
                    && !spec.primary_key
                {
                    return Err(invalid("MODIFY requires at least one change"));
                }
                let mut col_def = column_def(
                    &spec.name,
                    data_type,
                    spec.not_null,
                    spec.unique,
                    spec.default_value.as_ref(),
                    spec.primary_key,
                );
                stmt.modify_column(&mut col_def);
            }
        }

        Ok(stmt.to_string(PostgresQueryBuilder))
    }

    /// 외래키 제약 추가/삭제
    pub fn foreign_key(change: &ForeignKeyChange) -> Result<String> {
        validate_identifier(&change.table_name)?;
        validate_identifier(&change.column_name)?;
        let name = change.constraint_name();
        validate_identifier(&name)?;

        match change.alter {
            ForeignKeyAlter::Add => {
                let fk_table = change
                    .fk_table
                    .as_deref()
                    .ok_or_else(|| Error::InvalidForeignKey {
                        table: change.table_name.clone(),
                        column: change.column_name.clone(),
                        reason: "ADD requires fkTable".to_string(),
                    })?;
                validate_identifier(fk_table)?;
                let fk_column = match &change.fk_column {
                    Some(c) => c.clone(),
                    None => TableName::new(fk_table).derived_key(),
                };
                validate_identifier(&fk_column)?;

                let mut stmt = ForeignKey::create();
                stmt.name(name)
                    .from(
                        DynIden::new(&change.table_name),
                        DynIden::new(&change.column_name),
                    )
                    .to(DynIden::new(fk_table), DynIden::new(fk_column));
                apply_actions(&mut stmt, change.on_delete, change.on_update);
                Ok(stmt.to_string(PostgresQueryBuilder))
            }
            ForeignKeyAlter::Drop => {
                let stmt = ForeignKey::drop()
                    .name(name)
                    .table(DynIden::new(&change.table_name))
                    .to_owned();
                Ok(stmt.to_string(PostgresQueryBuilder))
            }
        }
    }

    /// DROP TABLE
    pub fn drop_table(table: &str) -> Result<String> {
        validate_identifier(table)?;
        let stmt = Table::drop().table(DynIden::new(table)).to_owned();
        Ok(stmt.to_string(PostgresQueryBuilder))
    }
}

/// 컬럼 정의 조립
///
/// 설정된 항목만 추가합니다. 타입이 없으면 MODIFY용 정의입니다.
fn column_def(
    name: &str,
    data_type: Option<String>,
    not_null: bool,
    unique: bool,
    default_value: Option<&DefaultValue>,
    primary_key: bool,
) -> ColumnDef {
    let mut col_def = ColumnDef::new(DynIden::new(name));
    if let Some(data_type) = data_type {
        col_def.custom(DynIden::new(data_type));
    }
    if not_null {
        col_def.not_null();
    }
    if unique {
        col_def.unique_key();
    }
    if let Some(default) = default_value {
        col_def.default(default_literal(default));
    }
    if primary_key {
        col_def.primary_key();
    }
    col_def
}

fn default_literal(value: &DefaultValue) -> Value {
    match value {
        DefaultValue::Bool(b) => (*b).into(),
        DefaultValue::Integer(i) => (*i).into(),
        DefaultValue::Float(f) => (*f).into(),
        DefaultValue::Text(s) => s.as_str().into(),
    }
}

fn apply_actions(
    stmt: &mut ForeignKeyCreateStatement,
    on_delete: Option<ReferentialAction>,
    on_update: Option<ReferentialAction>,
) {
    if let Some(action) = on_delete {
        stmt.on_delete(map_fk_action(action));
    }
    if let Some(action) = on_update {
        stmt.on_update(map_fk_action(action));
    }
}

fn map_fk_action(action: ReferentialAction) -> ForeignKeyAction {
    match action {
        ReferentialAction::Cascade => ForeignKeyAction::Cascade,
        ReferentialAction::Restrict => ForeignKeyAction::Restrict,
        ReferentialAction::SetNull => ForeignKeyAction::SetNull,
        ReferentialAction::SetDefault => ForeignKeyAction::SetDefault,
        ReferentialAction::NoAction => ForeignKeyAction::NoAction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, data_type: &str) -> ColumnSpec {
        ColumnSpec {
            name: name.to_string(),
            data_type: data_type.to_string(),
            size: None,
            not_null: false,
            unique: false,
            default_value: None,
            primary_key: false,
            foreign_key: None,
        }
    }

    fn alteration(alter: AlterAction, name: &str) -> AlterColumnSpec {
        AlterColumnSpec {
            alter,
            name: name.to_string(),
            new_value: None,
            data_type: None,
            size: None,
            not_null: false,
            unique: false,
            default_value: None,
            primary_key: false,
        }
    }

    #[test]
    fn test_create_table() {
        let mut title = column("title", "VARCHAR");
        title.size = Some(255);
        title.not_null = true;

        let mut status = column("status", "text");
        status.default_value = Some(DefaultValue::Text("draft".to_string()));

        let (table, sql) = DdlGenerator::create_table("post", &[title, status]).unwrap();

        assert_eq!(table.as_str(), "posts");
        assert!(sql.starts_with("CREATE TABLE \"posts\""));
        assert!(sql.contains("\"post_id\" SERIAL PRIMARY KEY"));
        assert!(sql.contains("\"title\" VARCHAR(255) NOT NULL"));
        assert!(sql.contains("\"status\" text DEFAULT 'draft'"));
        assert!(!sql.contains("UNIQUE"));
        assert!(!sql.contains("IF NOT EXISTS"));
    }

    #[test]
    fn test_create_table_with_reference() {
        let mut author = column("author_id", "INTEGER");
        author.foreign_key = Some(ForeignKeySpec {
            table: "authors".to_string(),
            column: None,
            on_delete: Some(ReferentialAction::Cascade),
            on_update: None,
        });

        let (_, sql) = DdlGenerator::create_table("posts", &[author]).unwrap();
        assert!(sql.contains("CONSTRAINT \"posts_author_id_fkey\""));
        assert!(sql.contains("FOREIGN KEY (\"author_id\") REFERENCES \"authors\" (\"author_id\")"));
        assert!(sql.contains("ON DELETE CASCADE"));
        assert!(!sql.contains("ON UPDATE"));
    }

    #[test]
    fn test_create_table_rejects_bad_input() {
        let err = DdlGenerator::create_table("posts", &[column("post_id", "INTEGER")]).unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn { .. }));

        let err = DdlGenerator::create_table("posts", &[column("a", "int"), column("a", "text")])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn { .. }));

        let err = DdlGenerator::create_table("posts; DROP TABLE users", &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier { .. }));

        let err = DdlGenerator::create_table("posts", &[column("title", "text); DROP TABLE x; --")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDataType { .. }));
    }

    #[test]
    fn test_alter_table_in_order() {
        let mut add = alteration(AlterAction::Add, "age");
        add.data_type = Some("INTEGER".to_string());
        add.not_null = true;

        let mut rename = alteration(AlterAction::RenameColumn, "name");
        rename.new_value = Some("full_name".to_string());

        let drop = alteration(AlterAction::DropColumn, "nickname");

        let sqls = DdlGenerator::alter_table("users", &[add, rename, drop]).unwrap();
        assert_eq!(sqls.len(), 3);
        assert!(sqls.iter().all(|s| s.starts_with("ALTER TABLE \"users\"")));
        assert!(sqls[0].contains("ADD COLUMN \"age\" INTEGER NOT NULL"));
        assert!(sqls[1].contains("RENAME COLUMN \"name\" TO \"full_name\""));
        assert!(sqls[2].contains("DROP COLUMN \"nickname\""));
    }

    #[test]
    fn test_alter_table_modify() {
        let mut modify = alteration(AlterAction::Modify, "age");
        modify.data_type = Some("BIGINT".to_string());
        modify.not_null = true;

        let sqls = DdlGenerator::alter_table("users", &[modify]).unwrap();
        assert!(sqls[0].contains("ALTER COLUMN \"age\" TYPE BIGINT"));
        assert!(sqls[0].contains("SET NOT NULL"));
    }

    #[test]
    fn test_alter_table_requirements() {
        let err = DdlGenerator::alter_table("users", &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyAlteration { .. }));

        let err = DdlGenerator::alter_table("users", &[alteration(AlterAction::Add, "age")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAlteration { .. }));

        let err =
            DdlGenerator::alter_table("users", &[alteration(AlterAction::RenameColumn, "name")])
                .unwrap_err();
        assert!(matches!(err, Error::InvalidAlteration { .. }));

        let err = DdlGenerator::alter_table("users", &[alteration(AlterAction::Modify, "age")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAlteration { .. }));

        let mut rename = alteration(AlterAction::RenameColumn, "name");
        rename.new_value = Some("full name".to_string());
        let err = DdlGenerator::alter_table("users", &[rename]).unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier { .. }));
    }

    fn fk_change(alter: ForeignKeyAlter) -> ForeignKeyChange {
        ForeignKeyChange {
            alter,
            table_name: "posts".to_string(),
            column_name: "author_id".to_string(),
            fk_table: Some("authors".to_string()),
            fk_column: None,
            on_delete: Some(ReferentialAction::SetNull),
            on_update: Some(ReferentialAction::Cascade),
        }
    }

    #[test]
    fn test_foreign_key_add() {
        let sql = DdlGenerator::foreign_key(&fk_change(ForeignKeyAlter::Add)).unwrap();
        assert!(sql.starts_with("ALTER TABLE \"posts\" ADD CONSTRAINT \"posts_author_id_fkey\""));
        assert!(sql.contains("FOREIGN KEY (\"author_id\") REFERENCES \"authors\" (\"author_id\")"));
        assert!(sql.contains("ON DELETE SET NULL"));
        assert!(sql.contains("ON UPDATE CASCADE"));

        let mut missing = fk_change(ForeignKeyAlter::Add);
        missing.fk_table = None;
        let err = DdlGenerator::foreign_key(&missing).unwrap_err();
        assert!(matches!(err, Error::InvalidForeignKey { .. }));
    }

    #[test]
    fn test_foreign_key_drop() {
        let sql = DdlGenerator::foreign_key(&fk_change(ForeignKeyAlter::Drop)).unwrap();
        assert_eq!(
            sql,
            "ALTER TABLE \"posts\" DROP CONSTRAINT \"posts_author_id_fkey\""
        );
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(
            DdlGenerator::drop_table("posts").unwrap(),
            "DROP TABLE \"posts\""
        );
        assert!(DdlGenerator::drop_table("posts, users").is_err());
    }
}
