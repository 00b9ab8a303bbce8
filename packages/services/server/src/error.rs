//! 서버 에러 타입

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 서버 에러
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("not found: {message}")]
    NotFound { message: String },

    /// 본문/쿼리/경로를 읽지 못함
    #[error("invalid request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("core error: {0}")]
    Core(#[from] tk_core::Error),
}

/// 에러 응답 JSON
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ServerError {
    pub(crate) fn parts(&self) -> (StatusCode, String, String) {
        match self {
            ServerError::NotFound { message } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND".to_string(), message.clone())
            }
            ServerError::Rejected { status, message } => {
                (*status, "INVALID_REQUEST".to_string(), message.clone())
            }
            ServerError::Database(sqlx::Error::Database(e)) => {
                // DB가 거부한 statement: 메시지와 SQLSTATE를 그대로 전달
                tracing::error!(code = ?e.code(), "Statement rejected by database: {}", e);
                let message = match e.code() {
                    Some(code) => format!("{} (SQLSTATE {})", e.message(), code),
                    None => e.message().to_string(),
                };
                (StatusCode::BAD_REQUEST, "EXECUTION_ERROR".to_string(), message)
            }
            ServerError::Database(
                e @ (sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)),
            ) => {
                tracing::error!("Database unavailable: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "DATABASE_UNAVAILABLE".to_string(),
                    "Database is unavailable".to_string(),
                )
            }
            ServerError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR".to_string(),
                    "Database operation failed".to_string(),
                )
            }
            ServerError::Core(e) => {
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, e.code().to_string(), e.to_string())
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                request_id: crate::middleware::current_request_id(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        ServerError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
