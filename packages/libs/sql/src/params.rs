//! 쿼리 옵션
//!
//! 목록 조회 요청의 URL 쿼리 문자열을 파싱하고 검증합니다.
//! 검증은 어떤 statement도 실행되기 전에 끝납니다.

use serde::{Deserialize, Serialize};

use tk_core::{Error, Pagination, Result};

/// URL 쿼리 그대로의 옵션 (모두 문자열)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueryOptions {
    #[serde(default)]
    pub order_by_column: Option<String>,

    #[serde(default)]
    pub order_by_direction: Option<String>,

    #[serde(default)]
    pub search_column: Option<String>,

    #[serde(default)]
    pub search_value: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub results_per_page: Option<String>,
}

/// 정렬 순서
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `asc`/`ASC`/`desc`/`DESC` 또는 빈 값만 허용
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None | Some("") | Some("asc") | Some("ASC") => Ok(SortDirection::Asc),
            Some("desc") | Some("DESC") => Ok(SortDirection::Desc),
            Some(other) => Err(Error::InvalidSortDirection {
                value: other.to_string(),
            }),
        }
    }
}

/// 페이지 크기 제한
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// `resultsPerPage`가 없을 때 사용할 값
    pub default_page_size: u64,

    /// 허용되는 최대 `resultsPerPage`
    pub max_page_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 30,
            max_page_size: 1000,
        }
    }
}

/// 검색 조건 입력
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    /// 검색 컬럼 (`table.column` 형태 허용)
    pub column: String,

    /// 검색 값 (없으면 빈 문자열)
    pub value: String,
}

/// 검증된 쿼리 옵션
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// 정렬 컬럼 (`table.column` 형태 허용)
    pub order_by_column: Option<String>,

    pub direction: SortDirection,

    /// 검색 조건 (`searchColumn`이 있을 때만)
    pub search: Option<Search>,

    pub pagination: Pagination,
}

impl QueryOptions {
    /// 문자열 옵션 파싱 및 검증
    pub fn parse(raw: &RawQueryOptions, limits: &PageLimits) -> Result<Self> {
        let per_page = match present(&raw.results_per_page) {
            None => limits.default_page_size,
            Some(value) => {
                let parsed = value
                    .parse::<u64>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| Error::InvalidResultsPerPage {
                        value: value.to_string(),
                    })?;
                if parsed > limits.max_page_size {
                    return Err(Error::ResultsPerPageTooLarge {
                        requested: parsed,
                        max: limits.max_page_size,
                    });
                }
                parsed
            }
        };

        let page = match present(&raw.page) {
            None => 1,
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| Error::InvalidPage {
                    value: value.to_string(),
                })?,
        };

        let direction = SortDirection::parse(raw.order_by_direction.as_deref())?;

        let search = present(&raw.search_column).map(|column| Search {
            column: column.to_string(),
            value: raw.search_value.clone().unwrap_or_default(),
        });

        Ok(Self {
            order_by_column: present(&raw.order_by_column).map(str::to_string),
            direction,
            search,
            pagination: Pagination::new(page, per_page),
        })
    }
}

/// 빈 문자열은 값이 없는 것으로 취급
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawQueryOptions {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = QueryOptions::parse(&RawQueryOptions::default(), &PageLimits::default()).unwrap();
        assert_eq!(options.pagination, Pagination::new(1, 30));
        assert_eq!(options.direction, SortDirection::Asc);
        assert!(options.search.is_none());
        assert!(options.order_by_column.is_none());
    }

    #[test]
    fn test_results_per_page_must_be_number() {
        let err = QueryOptions::parse(&raw(&[("resultsPerPage", "abc")]), &PageLimits::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResultsPerPage { .. }));
        assert_eq!(
            err.to_string(),
            "Results per page expected a number, but got \"abc\" instead."
        );

        for bad in ["0", "-5", "2.5"] {
            let result = QueryOptions::parse(&raw(&[("resultsPerPage", bad)]), &PageLimits::default());
            assert!(result.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_results_per_page_limit() {
        let limits = PageLimits {
            default_page_size: 30,
            max_page_size: 100,
        };
        let err = QueryOptions::parse(&raw(&[("resultsPerPage", "101")]), &limits).unwrap_err();
        assert!(matches!(err, Error::ResultsPerPageTooLarge { .. }));

        let options = QueryOptions::parse(&raw(&[("resultsPerPage", "100")]), &limits).unwrap();
        assert_eq!(options.pagination.per_page, 100);
    }

    #[test]
    fn test_page_must_be_positive() {
        for bad in ["0", "-1", "two"] {
            let err = QueryOptions::parse(&raw(&[("page", bad)]), &PageLimits::default()).unwrap_err();
            assert!(matches!(err, Error::InvalidPage { .. }));
        }

        let options = QueryOptions::parse(&raw(&[("page", "3")]), &PageLimits::default()).unwrap();
        assert_eq!(options.pagination.page, 3);
        assert_eq!(options.pagination.offset(), 60);
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::parse(None).unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("")).unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("ASC")).unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("desc")).unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("DESC")).unwrap(), SortDirection::Desc);

        for bad in ["Desc", "descending", "up"] {
            let err = SortDirection::parse(Some(bad)).unwrap_err();
            assert!(matches!(err, Error::InvalidSortDirection { .. }));
        }
    }

    #[test]
    fn test_search_requires_column() {
        let options =
            QueryOptions::parse(&raw(&[("searchValue", "bob")]), &PageLimits::default()).unwrap();
        assert!(options.search.is_none());

        let options =
            QueryOptions::parse(&raw(&[("searchColumn", "name")]), &PageLimits::default()).unwrap();
        let search = options.search.unwrap();
        assert_eq!(search.column, "name");
        assert_eq!(search.value, "");
    }
}
