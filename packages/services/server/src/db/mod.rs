//! 관리용 DB 엔진
//!
//! tk-sql이 만든 statement를 sqlx Pool에서 실행합니다.
//! 카탈로그는 호출마다 다시 읽습니다.

mod rows;

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Row;

use tk_core::catalog::{ColumnInfo, TableInfo};
use tk_core::schema::{AlterColumnSpec, ColumnSpec, ForeignKeyChange, JoinSpec, TableName};
use tk_core::{Error, PagedResult, Record};
use tk_sql::catalog::{DESCRIBE_TABLE_SQL, LIST_TABLES_SQL};
use tk_sql::{
    CountBuilder, DdlGenerator, GetOneBuilder, InsertBuilder, JoinSelectBuilder, PageLimits,
    Planner, QueryOptions, RawQueryOptions, ReadPlan, SelectBuilder,
};

use crate::config::Config;
use crate::error::Result;
use rows::{bind_values, row_to_record, rows_to_records};

/// 관리용 DB 엔진
pub struct AdminDb {
    pool: PgPool,
    schema: String,
    limits: PageLimits,
}

impl AdminDb {
    /// Pool 생성
    ///
    /// 연결은 첫 요청 시 맺습니다. DB가 내려가 있어도 서버는 뜹니다.
    /// 생성하는 테이블도 설정한 스키마에 들어가도록 search_path를 맞춥니다.
    pub fn connect(config: &Config) -> std::result::Result<Self, sqlx::Error> {
        let options = PgConnectOptions::from_str(&config.database_url)?
            .options([("search_path", config.db_schema.as_str())]);
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect_lazy_with(options);

        Ok(Self {
            pool,
            schema: config.db_schema.clone(),
            limits: config.page_limits,
        })
    }

    /// `SELECT 1` 성공 여부
    pub async fn ping(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                false
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────────────────────────

    /// 스키마의 테이블 목록 (`[{"table_name": ...}]`, 이름순)
    pub async fn list_tables(&self) -> Result<Vec<Record>> {
        tracing::debug!(sql = LIST_TABLES_SQL, "Listing tables");
        let names: Vec<String> = sqlx::query_scalar(LIST_TABLES_SQL)
            .bind(&self.schema)
            .fetch_all(&self.pool)
            .await?;

        Ok(names
            .into_iter()
            .map(|name| {
                let mut record = Record::new();
                record.insert("table_name".to_string(), name.into());
                record
            })
            .collect())
    }

    /// 테이블 컬럼 정보 (allow-list)
    pub async fn describe_table(&self, table: &str) -> Result<TableInfo> {
        let columns: Vec<(String, String, String, bool, i32)> =
            sqlx::query_as(DESCRIBE_TABLE_SQL)
                .bind(&self.schema)
                .bind(table)
                .fetch_all(&self.pool)
                .await?;

        if columns.is_empty() {
            return Err(Error::UnknownTable {
                table: table.to_string(),
            }
            .into());
        }

        let columns = columns
            .into_iter()
            .map(|(name, data_type, udt_name, nullable, ordinal)| ColumnInfo {
                name,
                data_type,
                udt_name,
                nullable,
                ordinal,
            })
            .collect();
        Ok(TableInfo::new(table, columns))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Read
    // ─────────────────────────────────────────────────────────────────────────────

    /// 단일 테이블 페이지 조회
    pub async fn list(&self, table: &str, raw: &RawQueryOptions) -> Result<PagedResult> {
        let options = QueryOptions::parse(raw, &self.limits)?;
        let info = self.describe_table(table).await?;
        let plan = Planner::new(&info).plan(&options)?;

        let (sql, values) = SelectBuilder::new(&plan).build()?;
        self.fetch_page(&plan, sql, values).await
    }

    /// 조인 페이지 조회
    ///
    /// 전체 결과 수와 페이지 수는 base 테이블 행 기준입니다.
    pub async fn list_joined(
        &self,
        table: &str,
        raw: &RawQueryOptions,
        joins: &[JoinSpec],
    ) -> Result<PagedResult> {
        let options = QueryOptions::parse(raw, &self.limits)?;
        let base = self.describe_table(table).await?;
        let mut joined = Vec::with_capacity(joins.len());
        for join in joins {
            joined.push(self.describe_table(&join.join_table).await?);
        }
        let plan = Planner::with_joins(&base, &joined, joins).plan(&options)?;

        let (sql, values) = JoinSelectBuilder::new(&plan).build()?;
        self.fetch_page(&plan, sql, values).await
    }

    /// COUNT 후 페이지 검사, 그 다음 데이터 조회
    async fn fetch_page(
        &self,
        plan: &ReadPlan,
        sql: String,
        values: Vec<serde_json::Value>,
    ) -> Result<PagedResult> {
        let (count_sql, count_values) = CountBuilder::new(plan).build()?;
        tracing::debug!(sql = %count_sql, "Counting rows");
        let row = bind_values(sqlx::query(&count_sql), count_values)
            .fetch_one(&self.pool)
            .await?;
        let total = row.try_get::<i64, _>(0)?.max(0) as u64;

        let total_pages = plan.pagination.resolve(plan.table.as_str(), total)?;

        tracing::debug!(sql = %sql, "Fetching page");
        let rows = bind_values(sqlx::query(&sql), values)
            .fetch_all(&self.pool)
            .await?;

        Ok(PagedResult::new(
            &plan.pagination,
            total,
            total_pages,
            rows_to_records(rows)?,
        ))
    }

    /// 단건 조회
    pub async fn get_one(&self, table: &str, column: &str, value: &str) -> Result<Record> {
        let info = self.describe_table(table).await?;
        let (sql, values) = GetOneBuilder::new(&info).build(column, value)?;

        tracing::debug!(sql = %sql, "Fetching record");
        let row = bind_values(sqlx::query(&sql), values)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row_to_record(&row)?),
            None => Err(Error::RecordNotFound {
                table: table.to_string(),
                column: column.to_string(),
                value: value.to_string(),
            }
            .into()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // DDL
    // ─────────────────────────────────────────────────────────────────────────────

    /// 테이블 생성 (생성된 테이블 이름 반환)
    pub async fn create_table(&self, raw_name: &str, columns: &[ColumnSpec]) -> Result<TableName> {
        let (table, sql) = DdlGenerator::create_table(raw_name, columns)?;

        tracing::debug!(sql = %sql, "Creating table");
        sqlx::query(&sql).execute(&self.pool).await?;
        tracing::info!("Created table {}", table);
        Ok(table)
    }

    /// 컬럼 변경 (하나의 트랜잭션)
    pub async fn alter_table(&self, table: &str, alterations: &[AlterColumnSpec]) -> Result<()> {
        let statements = DdlGenerator::alter_table(table, alterations)?;

        let mut tx = self.pool.begin().await?;
        for sql in &statements {
            tracing::debug!(sql = %sql, "Altering table");
            sqlx::query(sql).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::info!("Applied {} alteration(s) to {}", statements.len(), table);
        Ok(())
    }

    /// 외래키 제약 추가/삭제
    pub async fn foreign_key_constraint(&self, change: &ForeignKeyChange) -> Result<()> {
        let sql = DdlGenerator::foreign_key(change)?;

        tracing::debug!(sql = %sql, "Changing foreign key");
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    /// 테이블 삭제
    pub async fn drop_table(&self, table: &str) -> Result<()> {
        let sql = DdlGenerator::drop_table(table)?;

        tracing::debug!(sql = %sql, "Dropping table");
        sqlx::query(&sql).execute(&self.pool).await?;
        tracing::info!("Dropped table {}", table);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Write
    // ─────────────────────────────────────────────────────────────────────────────

    /// 레코드 일괄 삽입
    ///
    /// 모든 statement를 먼저 만든 뒤 하나의 트랜잭션에서 입력 순서대로 실행합니다.
    /// 하나라도 실패하면 전부 롤백됩니다.
    pub async fn insert_many(&self, table: &str, records: &[Record]) -> Result<Vec<Record>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let info = self.describe_table(table).await?;
        let builder = InsertBuilder::new(&info);
        let statements = records
            .iter()
            .map(|record| builder.build(record))
            .collect::<tk_core::Result<Vec<_>>>()?;

        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(statements.len());
        for (sql, values) in statements {
            tracing::debug!(sql = %sql, "Inserting record");
            let row = bind_values(sqlx::query(&sql), values)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row_to_record(&row)?);
        }
        tx.commit().await?;

        tracing::info!("Inserted {} record(s) into {}", inserted.len(), table);
        Ok(inserted)
    }
}
