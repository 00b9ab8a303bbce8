//! 레코드 삽입

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use tk_core::Record;

use crate::error::Result;
use crate::extract;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddRecordsRequest {
    pub records: Vec<Record>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRecordsResponse {
    pub table: String,
    pub new_columns: Vec<Record>,
}

/// POST /api/add-records/:tableName
pub async fn add_records(
    State(state): State<Arc<AppState>>,
    extract::Path(table): extract::Path<String>,
    extract::Json(request): extract::Json<AddRecordsRequest>,
) -> Result<Json<AddRecordsResponse>> {
    let inserted = state.db.insert_many(&table, &request.records).await?;
    Ok(Json(AddRecordsResponse {
        table,
        new_columns: inserted,
    }))
}
