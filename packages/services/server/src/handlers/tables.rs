//! 테이블 목록

use std::sync::Arc;

use axum::{extract::State, Json};

use tk_core::Record;

use crate::error::Result;
use crate::state::AppState;

/// GET /api/read/all-tables
pub async fn list_tables(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Record>>> {
    let tables = state.db.list_tables().await?;
    Ok(Json(tables))
}
