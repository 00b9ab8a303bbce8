//! 스키마 변경 (DDL)

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use tk_core::schema::{AlterColumnSpec, ColumnSpec, ForeignKeyChange};

use super::MessageResponse;
use crate::error::Result;
use crate::extract;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableRequest {
    pub table_name: String,
    pub columns: Vec<AlterColumnSpec>,
}

/// POST /api/create-table
pub async fn create_table(
    State(state): State<Arc<AppState>>,
    extract::Json(request): extract::Json<CreateTableRequest>,
) -> Result<Json<MessageResponse>> {
    state
        .db
        .create_table(&request.table_name, &request.columns)
        .await?;
    Ok(Json(MessageResponse::success()))
}

/// PUT /api/update-table
pub async fn update_table(
    State(state): State<Arc<AppState>>,
    extract::Json(request): extract::Json<UpdateTableRequest>,
) -> Result<Json<MessageResponse>> {
    state
        .db
        .alter_table(&request.table_name, &request.columns)
        .await?;
    Ok(Json(MessageResponse::success()))
}

/// PUT /api/fk-constraint
pub async fn foreign_key_constraint(
    State(state): State<Arc<AppState>>,
    extract::Json(change): extract::Json<ForeignKeyChange>,
) -> Result<Json<MessageResponse>> {
    state.db.foreign_key_constraint(&change).await?;
    Ok(Json(MessageResponse::success()))
}

/// DELETE /api/delete/:tableName
pub async fn drop_table(
    State(state): State<Arc<AppState>>,
    extract::Path(table): extract::Path<String>,
) -> Result<Json<MessageResponse>> {
    state.db.drop_table(&table).await?;
    Ok(Json(MessageResponse::success()))
}
