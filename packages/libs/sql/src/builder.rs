//! SELECT/COUNT/INSERT 빌더
//!
//! `ReadPlan`과 카탈로그 정보를 받아 SQL을 생성합니다.
//! 모든 빌더는 `(SQL 문자열, 바인딩할 값들)`을 반환합니다.
//! 값은 `$1, $2, ...` 순서이며 SQL 텍스트에 직접 들어가지 않습니다.

use sea_query::{
    Asterisk, Expr, Func, Order, PostgresQueryBuilder, Query, SelectStatement, SimpleExpr,
    Value as SeaValue, Values,
};
use serde_json::{Number, Value};

use tk_core::catalog::TableInfo;
use tk_core::{Error, Record, Result};

use crate::ident::{cast_type, DynIden};
use crate::params::SortDirection;
use crate::planner::{ColumnRef, ProjectedColumn, ReadPlan, SearchPredicate};

/// 서버가 그대로 디코딩하는 타입 (udt_name)
///
/// 나머지 타입(enum, interval, 배열, bytea, inet 등)은 text로 CAST 해서 읽습니다.
pub const NATIVE_TYPES: &[&str] = &[
    "bool",
    "int2",
    "int4",
    "int8",
    "float4",
    "float8",
    "numeric",
    "text",
    "varchar",
    "bpchar",
    "name",
    "json",
    "jsonb",
    "uuid",
    "date",
    "time",
    "timestamp",
    "timestamptz",
];

/// 디코더가 직접 읽을 수 있는 타입인지
pub fn reads_natively(udt_name: &str) -> bool {
    NATIVE_TYPES.contains(&udt_name)
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

fn column_expr(column: &ColumnRef) -> Expr {
    Expr::col((DynIden::new(&column.table), DynIden::new(&column.column)))
}

/// 결과 컬럼 식 (필요하면 text로 CAST)
///
/// Postgres는 `CAST(col AS text)`의 결과 이름을 `col`로 붙입니다.
fn projected_expr(projected: &ProjectedColumn) -> SimpleExpr {
    let expr = column_expr(&projected.column);
    if reads_natively(&projected.udt_name) {
        expr.into()
    } else {
        expr.cast_as(DynIden::new("text"))
    }
}

/// SELECT 목록 추가
fn apply_projection(query: &mut SelectStatement, columns: &[ProjectedColumn]) {
    for projected in columns {
        if reads_natively(&projected.udt_name) {
            query.column((
                DynIden::new(&projected.column.table),
                DynIden::new(&projected.column.column),
            ));
        } else {
            query.expr_as(
                projected_expr(projected),
                DynIden::new(&projected.column.column),
            );
        }
    }
}

/// 검색 조건을 WHERE에 추가
///
/// COUNT와 SELECT가 같은 조건을 쓰도록 이 함수 하나로만 만듭니다.
fn apply_predicate(query: &mut SelectStatement, predicate: Option<&SearchPredicate>) -> Result<()> {
    let Some(predicate) = predicate else {
        return Ok(());
    };

    let condition: SimpleExpr = match predicate {
        SearchPredicate::Equals {
            column,
            value,
            cast,
        } => column_expr(column).eq(Expr::val(value.as_str()).cast_as(cast_type(cast)?)),
        SearchPredicate::Contains { column, pattern } => column_expr(column).like(pattern.as_str()),
    };
    query.and_where(condition);
    Ok(())
}

/// 페이지 SELECT 공통 부분 (WHERE, ORDER BY, LIMIT, OFFSET)
fn apply_page(query: &mut SelectStatement, plan: &ReadPlan) -> Result<()> {
    apply_predicate(query, plan.predicate.as_ref())?;
    query
        .order_by(
            (
                DynIden::new(&plan.order_by.table),
                DynIden::new(&plan.order_by.column),
            ),
            plan.direction.into(),
        )
        .limit(plan.pagination.per_page)
        .offset(plan.pagination.offset());
    Ok(())
}

/// COUNT 빌더
///
/// 조인 여부와 상관없이 base 테이블만 셉니다.
/// 페이지 수는 base 테이블 행 수 기준입니다.
pub struct CountBuilder<'a> {
    plan: &'a ReadPlan,
}

impl<'a> CountBuilder<'a> {
    pub fn new(plan: &'a ReadPlan) -> Self {
        Self { plan }
    }

    pub fn build(&self) -> Result<(String, Vec<Value>)> {
        let mut query = Query::select();
        query
            .expr(Func::count(Expr::col(Asterisk)))
            .from(DynIden::new(self.plan.table.as_str()));
        apply_predicate(&mut query, self.plan.predicate.as_ref())?;

        let (sql, values) = query.build(PostgresQueryBuilder);
        Ok((sql, into_params(values)))
    }
}

/// 단일 테이블 SELECT 빌더
pub struct SelectBuilder<'a> {
    plan: &'a ReadPlan,
}

impl<'a> SelectBuilder<'a> {
    pub fn new(plan: &'a ReadPlan) -> Self {
        Self { plan }
    }

    pub fn build(&self) -> Result<(String, Vec<Value>)> {
        let mut query = Query::select();
        apply_projection(&mut query, &self.plan.columns);
        query.from(DynIden::new(self.plan.table.as_str()));
        apply_page(&mut query, self.plan)?;

        let (sql, values) = query.build(PostgresQueryBuilder);
        Ok((sql, into_params(values)))
    }
}

/// 조인 SELECT 빌더
///
/// base 테이블 전체 컬럼 + 조인된 각 테이블 전체 컬럼을 선택합니다.
/// 이름이 겹치는 컬럼은 합치지 않습니다.
pub struct JoinSelectBuilder<'a> {
    plan: &'a ReadPlan,
}

impl<'a> JoinSelectBuilder<'a> {
    pub fn new(plan: &'a ReadPlan) -> Self {
        Self { plan }
    }

    pub fn build(&self) -> Result<(String, Vec<Value>)> {
        let mut query = Query::select();
        apply_projection(&mut query, &self.plan.columns);
        query.from(DynIden::new(self.plan.table.as_str()));

        for join in &self.plan.joins {
            query.inner_join(
                DynIden::new(&join.table),
                Expr::col((DynIden::new(&join.table), DynIden::new(&join.table_column)))
                    .equals((DynIden::new(&join.left.table), DynIden::new(&join.left.column))),
            );
        }
        apply_page(&mut query, self.plan)?;

        let (sql, values) = query.build(PostgresQueryBuilder);
        Ok((sql, into_params(values)))
    }
}

/// 단건 조회 빌더
///
/// 키 값은 텍스트로 바인딩하고 컬럼 타입으로 CAST 합니다.
/// 키가 숫자라고 가정하지 않습니다.
pub struct GetOneBuilder<'a> {
    table: &'a TableInfo,
}

impl<'a> GetOneBuilder<'a> {
    pub fn new(table: &'a TableInfo) -> Self {
        Self { table }
    }

    pub fn build(&self, key_column: &str, key_value: &str) -> Result<(String, Vec<Value>)> {
        let column = self.table.require_column(key_column)?;
        let table = DynIden::new(self.table.name.as_str());

        let mut query = Query::select();
        apply_projection(&mut query, &ProjectedColumn::all(self.table));
        query.from(table.clone()).and_where(
            Expr::col((table, DynIden::new(&column.name)))
                .eq(Expr::val(key_value).cast_as(cast_type(&column.udt_name)?)),
        );

        let (sql, values) = query.build(PostgresQueryBuilder);
        Ok((sql, into_params(values)))
    }
}

/// INSERT 빌더
///
/// 레코드 하나당 `INSERT ... RETURNING <모든 컬럼>` 하나를 만듭니다.
/// 레코드 키는 카탈로그 컬럼이어야 하고, 값은 텍스트로 바인딩한 뒤 컬럼 타입으로 CAST 합니다.
pub struct InsertBuilder<'a> {
    table: &'a TableInfo,
}

impl<'a> InsertBuilder<'a> {
    pub fn new(table: &'a TableInfo) -> Self {
        Self { table }
    }

    /// SQL 생성
    pub fn build(&self, record: &Record) -> Result<(String, Vec<Value>)> {
        let mut query = Query::insert();
        query.into_table(DynIden::new(self.table.name.as_str()));

        if record.is_empty() {
            query.or_default_values();
        } else {
            let mut columns = Vec::with_capacity(record.len());
            let mut values = Vec::with_capacity(record.len());

            for (key, value) in record {
                let column = self.table.require_column(key)?;
                columns.push(DynIden::new(&column.name));
                values.push(Expr::val(value_text(value)).cast_as(cast_type(&column.udt_name)?));
            }

            query.columns(columns);
            query.values(values).map_err(|e| Error::Statement {
                message: e.to_string(),
            })?;
        }

        query.returning(
            Query::returning().exprs(ProjectedColumn::all(self.table).iter().map(projected_expr)),
        );

        let (sql, values) = query.build(PostgresQueryBuilder);
        Ok((sql, into_params(values)))
    }
}

/// 레코드 값의 텍스트 표현 (NULL은 None)
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // JSON 컬럼으로 직렬화
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// SeaQuery 바인딩 값을 JSON 값으로 변환
///
/// 빌더는 텍스트와 정수(LIMIT/OFFSET) 값만 바인딩합니다.
fn into_params(values: Values) -> Vec<Value> {
    values
        .0
        .into_iter()
        .map(|value| match value {
            SeaValue::Bool(b) => b.map(Value::Bool),
            SeaValue::Int(i) => i.map(|i| Value::Number(i.into())),
            SeaValue::BigInt(i) => i.map(|i| Value::Number(i.into())),
            SeaValue::Unsigned(u) => u.map(|u| Value::Number(u.into())),
            SeaValue::BigUnsigned(u) => u.map(|u| Value::Number(u.into())),
            SeaValue::Double(f) => f.and_then(Number::from_f64).map(Value::Number),
            SeaValue::String(s) => s.map(|s| Value::String(*s)),
            _ => None,
        }
        .unwrap_or(Value::Null))
        .collect()
}
