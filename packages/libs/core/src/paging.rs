//! 페이지 계산 및 응답 형태
//!
//! 모든 읽기 연산은 `PagedResult`로 응답합니다.
//!
//! - `offset = (page - 1) * per_page`
//! - `total_pages = ceil(total / per_page)`
//! - `results_range`는 1부터 시작하는 `start-end`이며 `end`는 `total`을 넘지 않습니다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// 레코드 (컬럼 이름 -> 값)
pub type Record = Map<String, Value>;

/// 페이지 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 현재 페이지 (1부터)
    pub page: u64,

    /// 페이지 당 결과 수 (1 이상)
    pub per_page: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// 건너뛸 행 수
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// 전체 페이지 수
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }

    /// 전체 결과 수에 대해 페이지가 유효한지 검사하고 전체 페이지 수를 반환
    ///
    /// 빈 테이블은 요청한 페이지와 상관없이 실패합니다.
    pub fn resolve(&self, table: &str, total: u64) -> Result<u64> {
        let total_pages = self.total_pages(total);
        if total_pages == 0 {
            return Err(Error::EmptyTable {
                table: table.to_string(),
            });
        }
        if self.page > total_pages {
            return Err(Error::PageOutOfRange {
                requested: self.page,
                total_pages,
            });
        }
        Ok(total_pages)
    }

    /// 표시 범위 (`start-end`, 1부터, end는 total로 제한)
    pub fn range(&self, total: u64) -> String {
        let start = self.offset() + 1;
        let end = (self.offset() + self.per_page).min(total);
        format!("{}-{}", start, end)
    }
}

/// 페이지 단위 조회 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult {
    pub current_page: u64,
    pub total_pages: u64,
    pub results_per_page: u64,
    pub total_results: u64,
    pub results_range: String,
    pub results: Vec<Record>,
}

impl PagedResult {
    /// 결과 생성
    ///
    /// `total_pages`는 `Pagination::resolve`가 반환한 값이어야 합니다.
    pub fn new(pagination: &Pagination, total: u64, total_pages: u64, results: Vec<Record>) -> Self {
        Self {
            current_page: pagination.page,
            total_pages,
            results_per_page: pagination.per_page,
            total_results: total,
            results_range: pagination.range(total),
            results,
        }
    }
}
