//! 행 조회 (페이지, 조인, 단건)

use std::sync::Arc;

use axum::{extract::State, Json};

use tk_core::schema::JoinSpec;
use tk_core::{PagedResult, Record};
use tk_sql::RawQueryOptions;

use crate::error::Result;
use crate::extract;
use crate::state::AppState;

/// GET /api/read/:tableName
pub async fn list_rows(
    State(state): State<Arc<AppState>>,
    extract::Path(table): extract::Path<String>,
    extract::Query(options): extract::Query<RawQueryOptions>,
) -> Result<Json<PagedResult>> {
    let page = state.db.list(&table, &options).await?;
    Ok(Json(page))
}

/// POST /api/join/:tableName
///
/// 본문은 `JoinSpec` 배열입니다.
pub async fn list_joined_rows(
    State(state): State<Arc<AppState>>,
    extract::Path(table): extract::Path<String>,
    extract::Query(options): extract::Query<RawQueryOptions>,
    extract::Json(joins): extract::Json<Vec<JoinSpec>>,
) -> Result<Json<PagedResult>> {
    let page = state.db.list_joined(&table, &options, &joins).await?;
    Ok(Json(page))
}

/// GET /api/read/:tableName/:primaryColumn/:value
pub async fn get_row(
    State(state): State<Arc<AppState>>,
    extract::Path((table, column, value)): extract::Path<(String, String, String)>,
) -> Result<Json<Record>> {
    let record = state.db.get_one(&table, &column, &value).await?;
    Ok(Json(record))
}
