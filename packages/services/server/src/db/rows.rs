//! 행 디코딩과 파라미터 바인딩

use rust_decimal::Decimal;
use serde_json::{Number, Value};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Postgres, Row, TypeInfo, ValueRef};

use tk_core::Record;

/// 빌더가 만든 값들을 순서대로 바인딩
pub fn bind_values<'a>(
    mut query: Query<'a, Postgres, PgArguments>,
    values: Vec<Value>,
) -> Query<'a, Postgres, PgArguments> {
    for value in values {
        match value {
            Value::Null => {
                let v: Option<String> = None;
                query = query.bind(v);
            }
            Value::Bool(b) => query = query.bind(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    query = query.bind(i);
                } else if let Some(f) = n.as_f64() {
                    query = query.bind(f);
                } else {
                    query = query.bind(n.to_string());
                }
            }
            Value::String(s) => query = query.bind(s),
            Value::Array(_) | Value::Object(_) => {
                query = query.bind(sqlx::types::Json(value));
            }
        }
    }
    query
}

pub fn rows_to_records(rows: Vec<PgRow>) -> Result<Vec<Record>, sqlx::Error> {
    rows.iter().map(row_to_record).collect()
}

/// 행을 컬럼 이름 → JSON 값 맵으로 변환
///
/// 이름이 겹치는 컬럼(조인 결과)은 뒤쪽 값이 남습니다.
/// NULL이 아닌 값을 읽지 못하면 에러입니다. 빌더가 낯선 타입을 text로 CAST 하므로
/// 정상 경로에서는 발생하지 않습니다.
pub fn row_to_record(row: &PgRow) -> Result<Record, sqlx::Error> {
    let mut record = Record::new();
    for (index, column) in row.columns().iter().enumerate() {
        let value = decode_column(row, index, column.type_info().name())?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

fn decode_column(row: &PgRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name.to_ascii_uppercase().as_str() {
        "INT2" => Value::Number(row.try_get::<i16, _>(index)?.into()),
        "INT4" => Value::Number(row.try_get::<i32, _>(index)?.into()),
        "INT8" => Value::Number(row.try_get::<i64, _>(index)?.into()),
        "FLOAT4" => float(row.try_get::<f32, _>(index)? as f64),
        "FLOAT8" => float(row.try_get::<f64, _>(index)?),
        // 정밀도 보존을 위해 문자열로 전달
        "NUMERIC" => Value::String(row.try_get::<Decimal, _>(index)?.to_string()),
        "BOOL" => Value::Bool(row.try_get(index)?),
        "JSON" | "JSONB" => row.try_get::<Value, _>(index)?,
        "UUID" => Value::String(row.try_get::<uuid::Uuid, _>(index)?.to_string()),
        "TIMESTAMPTZ" => Value::String(
            row.try_get::<chrono::DateTime<chrono::Utc>, _>(index)?
                .to_rfc3339(),
        ),
        "TIMESTAMP" => Value::String(
            row.try_get::<chrono::NaiveDateTime, _>(index)?
                .format("%Y-%m-%dT%H:%M:%S%.f")
                .to_string(),
        ),
        "DATE" => Value::String(row.try_get::<chrono::NaiveDate, _>(index)?.to_string()),
        "TIME" => Value::String(row.try_get::<chrono::NaiveTime, _>(index)?.to_string()),
        _ => Value::String(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}

/// NaN/Infinity는 JSON 숫자가 아니므로 문자열로 전달
fn float(value: f64) -> Value {
    match Number::from_f64(value) {
        Some(n) => Value::Number(n),
        None => Value::String(value.to_string()),
    }
}
