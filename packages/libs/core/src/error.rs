//! 공통 에러 타입
//!
//! 요청 검증 실패와 조회 실패를 표현합니다.
//! DB 실행 에러(`sqlx::Error`)는 서버 크레이트에서 별도로 감쌉니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 에러 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 잘못된 입력 (어떤 statement도 실행되기 전에 발생)
    Validation,
    /// 대상 테이블/레코드가 없음
    NotFound,
    /// statement 생성 또는 실행 실패
    Execution,
}

/// Tablekit 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Query Option Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("Results per page expected a number, but got \"{value}\" instead.")]
    InvalidResultsPerPage { value: String },

    #[error("Results per page is limited to {max}, but got {requested}.")]
    ResultsPerPageTooLarge { requested: u64, max: u64 },

    #[error("Page expected a whole number of at least 1, but got \"{value}\" instead.")]
    InvalidPage { value: String },

    #[error("URL Query Error (orderByDirection): got \"{value}\". Please enter 'asc' or 'ASC' for ascending order (this is the default behavior if blank) or 'desc' or 'DESC' for descending order.")]
    InvalidSortDirection { value: String },

    #[error("The table you queried exists, but is empty. Please add some data so you can get results back.")]
    EmptyTable { table: String },

    #[error("You tried to grab page {requested} but there are only {total_pages} pages for this query.")]
    PageOutOfRange { requested: u64, total_pages: u64 },

    // ─────────────────────────────────────────────────────────────────────────────
    // Identifier Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid identifier: \"{name}\"")]
    InvalidIdentifier { name: String },

    #[error("invalid data type: \"{data_type}\"")]
    InvalidDataType { data_type: String },

    #[error("table not found: {table}")]
    UnknownTable { table: String },

    #[error("column \"{column}\" does not exist in table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("table \"{table}\" is not part of this query")]
    TableNotInQuery { table: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // DDL Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid alteration of column \"{column}\": {reason}")]
    InvalidAlteration { column: String, reason: String },

    #[error("no alterations given for table {table}")]
    EmptyAlteration { table: String },

    #[error("duplicate column \"{column}\" in table {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("invalid foreign key change on {table}.{column}: {reason}")]
    InvalidForeignKey {
        table: String,
        column: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────────────────────
    // Lookup Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("There is no {column}: {value} in {table} table.")]
    RecordNotFound {
        table: String,
        column: String,
        value: String,
    },

    // ─────────────────────────────────────────────────────────────────────────────
    // Statement Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("failed to build statement: {message}")]
    Statement { message: String },
}

impl Error {
    /// 에러 분류
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownTable { .. } | Error::RecordNotFound { .. } => ErrorKind::NotFound,
            Error::Statement { .. } => ErrorKind::Execution,
            _ => ErrorKind::Validation,
        }
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Execution => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidResultsPerPage { .. } => "INVALID_RESULTS_PER_PAGE",
            Error::ResultsPerPageTooLarge { .. } => "RESULTS_PER_PAGE_TOO_LARGE",
            Error::InvalidPage { .. } => "INVALID_PAGE",
            Error::InvalidSortDirection { .. } => "INVALID_SORT_DIRECTION",
            Error::EmptyTable { .. } => "EMPTY_TABLE",
            Error::PageOutOfRange { .. } => "PAGE_OUT_OF_RANGE",
            Error::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            Error::InvalidDataType { .. } => "INVALID_DATA_TYPE",
            Error::UnknownTable { .. } => "UNKNOWN_TABLE",
            Error::UnknownColumn { .. } => "UNKNOWN_COLUMN",
            Error::TableNotInQuery { .. } => "TABLE_NOT_IN_QUERY",
            Error::InvalidAlteration { .. } => "INVALID_ALTERATION",
            Error::EmptyAlteration { .. } => "EMPTY_ALTERATION",
            Error::DuplicateColumn { .. } => "DUPLICATE_COLUMN",
            Error::InvalidForeignKey { .. } => "INVALID_FOREIGN_KEY",
            Error::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            Error::Statement { .. } => "STATEMENT_ERROR",
        }
    }
}
