//! HTTP 핸들러

pub mod health;
pub mod records;
pub mod rows;
pub mod schema;
pub mod tables;

use axum::http::Uri;
use serde::Serialize;

use crate::error::ServerError;

/// DDL 성공 응답 (`{"message":"success"}`)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn success() -> Self {
        Self { message: "success" }
    }
}

/// 없는 경로
pub async fn not_found(uri: Uri) -> ServerError {
    ServerError::NotFound {
        message: format!("No route for {}", uri.path()),
    }
}
