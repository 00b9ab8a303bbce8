//! 페이지/정렬/검색 계획
//!
//! 쿼리 옵션과 카탈로그 정보를 받아 읽기 계획(`ReadPlan`)을 만듭니다.
//! 계획에 들어가는 모든 컬럼은 카탈로그 allow-list로 검증된 것입니다.
//!
//! # 기본 정렬
//!
//! `orderByColumn`이 없으면 다음 순서로 정합니다.
//!
//! 1. 검색 컬럼
//! 2. base 테이블의 유도된 기본 키 (`<단수형>_id`), 카탈로그에 있을 때만
//! 3. base 테이블의 첫 번째 컬럼
//!
//! 결정적인 페이지 순서를 위한 기본값일 뿐 스키마를 가정하지 않습니다.
//!
//! # 검색 조건
//!
//! 검색 값이 숫자로 해석되면 정확히 일치(`=`), 아니면 부분 문자열 일치(`LIKE`,
//! 대소문자 구분)를 사용합니다. 컬럼 타입을 보지 않는 휴리스틱입니다.

use tk_core::catalog::{ColumnInfo, TableInfo};
use tk_core::schema::{JoinSpec, TableName};
use tk_core::{Error, Pagination, Result};

use crate::ident::escape_like;
use crate::params::{QueryOptions, SortDirection};

/// 테이블로 한정된 컬럼
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    fn new(table: &TableInfo, column: &ColumnInfo) -> Self {
        Self {
            table: table.name.to_string(),
            column: column.name.clone(),
        }
    }
}

/// 검색 조건
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPredicate {
    /// `column = CAST(value AS cast)`
    Equals {
        column: ColumnRef,
        value: String,
        cast: String,
    },

    /// `column LIKE pattern` (`%value%`, 메타문자 이스케이프됨)
    Contains { column: ColumnRef, pattern: String },
}

impl SearchPredicate {
    fn new(column: ColumnRef, info: &ColumnInfo, value: &str) -> Self {
        if is_numeric(value) {
            SearchPredicate::Equals {
                column,
                value: value.trim().to_string(),
                cast: info.udt_name.clone(),
            }
        } else {
            SearchPredicate::Contains {
                column,
                pattern: format!("%{}%", escape_like(value)),
            }
        }
    }
}

/// 결과 컬럼 (SELECT/RETURNING 목록의 한 항목)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedColumn {
    pub column: ColumnRef,

    /// 카탈로그 타입 이름 (udt_name)
    pub udt_name: String,
}

impl ProjectedColumn {
    /// 테이블의 모든 컬럼 (ordinal 순서)
    pub fn all(table: &TableInfo) -> Vec<ProjectedColumn> {
        table
            .columns
            .iter()
            .map(|column| ProjectedColumn {
                column: ColumnRef::new(table, column),
                udt_name: column.udt_name.clone(),
            })
            .collect()
    }
}

/// 검증된 조인 단계
///
/// `table.table_column = left.column`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinStep {
    pub table: String,
    pub table_column: String,
    pub left: ColumnRef,
}

/// 읽기 계획
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPlan {
    /// base 테이블
    pub table: TableName,

    /// 조인 단계 (입력 순서, left-deep)
    pub joins: Vec<JoinStep>,

    /// 결과 컬럼 (base 테이블, 그 다음 조인 순서대로)
    pub columns: Vec<ProjectedColumn>,

    /// 검색 조건 (base 테이블 컬럼만)
    pub predicate: Option<SearchPredicate>,

    /// 정렬 컬럼 (항상 테이블로 한정)
    pub order_by: ColumnRef,

    pub direction: SortDirection,

    pub pagination: Pagination,
}

/// 읽기 계획 생성기
pub struct Planner<'a> {
    base: &'a TableInfo,
    joined: &'a [TableInfo],
    joins: &'a [JoinSpec],
}

impl<'a> Planner<'a> {
    /// 단일 테이블 계획
    pub fn new(base: &'a TableInfo) -> Self {
        Self {
            base,
            joined: &[],
            joins: &[],
        }
    }

    /// 조인 계획
    ///
    /// `joined[i]`는 `joins[i].join_table`의 카탈로그 정보여야 합니다.
    pub fn with_joins(base: &'a TableInfo, joined: &'a [TableInfo], joins: &'a [JoinSpec]) -> Self {
        Self {
            base,
            joined,
            joins,
        }
    }

    /// 계획 생성
    pub fn plan(&self, options: &QueryOptions) -> Result<ReadPlan> {
        let joins = self.resolve_joins()?;

        let predicate = match &options.search {
            Some(search) => {
                let (column, info) = self.resolve(&search.column, &[self.base])?;
                Some(SearchPredicate::new(column, info, &search.value))
            }
            None => None,
        };

        let order_by = match &options.order_by_column {
            Some(reference) => self.resolve(reference, &self.scope(self.joined.len()))?.0,
            None => self.default_order(predicate.as_ref())?,
        };

        let columns = self
            .scope(joins.len())
            .into_iter()
            .flat_map(ProjectedColumn::all)
            .collect();

        Ok(ReadPlan {
            table: self.base.name.clone(),
            joins,
            columns,
            predicate,
            order_by,
            direction: options.direction,
            pagination: options.pagination,
        })
    }

    /// 조인 검증 (각 조인은 base와 앞선 조인 테이블만 참조 가능)
    fn resolve_joins(&self) -> Result<Vec<JoinStep>> {
        let mut steps = Vec::with_capacity(self.joins.len());

        for (index, join) in self.joins.iter().enumerate() {
            let table = self
                .joined
                .get(index)
                .filter(|t| t.name.as_str() == join.join_table)
                .ok_or_else(|| Error::UnknownTable {
                    table: join.join_table.clone(),
                })?;
            let table_column = table.require_column(&join.table_column)?;
            let (left, _) = self.resolve(&join.join_column, &self.scope(index))?;

            steps.push(JoinStep {
                table: table.name.to_string(),
                table_column: table_column.name.clone(),
                left,
            });
        }

        Ok(steps)
    }

    fn default_order(&self, predicate: Option<&SearchPredicate>) -> Result<ColumnRef> {
        if let Some(predicate) = predicate {
            let column = match predicate {
                SearchPredicate::Equals { column, .. } | SearchPredicate::Contains { column, .. } => {
                    column
                }
            };
            return Ok(column.clone());
        }

        let derived = self.base.name.derived_key();
        let column = self
            .base
            .column(&derived)
            .or_else(|| self.base.first_column())
            .ok_or_else(|| Error::UnknownTable {
                table: self.base.name.to_string(),
            })?;
        Ok(ColumnRef::new(self.base, column))
    }

    /// base + 앞선 `count`개의 조인 테이블
    fn scope(&self, count: usize) -> Vec<&'a TableInfo> {
        std::iter::once(self.base)
            .chain(self.joined.iter().take(count))
            .collect()
    }

    /// `column` 또는 `table.column` 참조를 범위 안에서 찾기
    ///
    /// 한정되지 않은 이름은 base 테이블 컬럼으로 봅니다.
    fn resolve<'t>(
        &self,
        reference: &str,
        scope: &[&'t TableInfo],
    ) -> Result<(ColumnRef, &'t ColumnInfo)> {
        let (table, column) = match reference.split_once('.') {
            Some((table_name, column)) => {
                let table = scope
                    .iter()
                    .find(|t| t.name.as_str() == table_name)
                    .ok_or_else(|| Error::TableNotInQuery {
                        table: table_name.to_string(),
                    })?;
                (*table, column)
            }
            None => (scope[0], reference),
        };

        let info = table.require_column(column)?;
        Ok((ColumnRef::new(table, info), info))
    }
}

/// 숫자로 해석되는지 (유한한 값만)
fn is_numeric(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PageLimits, RawQueryOptions};
    use tk_core::catalog::ColumnInfo;

    fn table(name: &str, columns: &[(&str, &str)]) -> TableInfo {
        TableInfo::new(
            name,
            columns
                .iter()
                .enumerate()
                .map(|(i, (column, udt))| ColumnInfo {
                    name: column.to_string(),
                    data_type: udt.to_string(),
                    udt_name: udt.to_string(),
                    nullable: true,
                    ordinal: i as i32 + 1,
                })
                .collect(),
        )
    }

    fn users() -> TableInfo {
        table(
            "users",
            &[("user_id", "int4"), ("name", "text"), ("age", "int4")],
        )
    }

    fn options(raw: RawQueryOptions) -> QueryOptions {
        QueryOptions::parse(&raw, &PageLimits::default()).unwrap()
    }

    fn search(column: &str, value: &str) -> RawQueryOptions {
        RawQueryOptions {
            search_column: Some(column.to_string()),
            search_value: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_order_is_derived_key() {
        let users = users();
        let plan = Planner::new(&users).plan(&options(RawQueryOptions::default())).unwrap();
        assert_eq!(
            plan.order_by,
            ColumnRef {
                table: "users".to_string(),
                column: "user_id".to_string()
            }
        );
        assert_eq!(plan.direction, SortDirection::Asc);
        assert!(plan.predicate.is_none());
    }

    #[test]
    fn test_default_order_falls_back_to_first_column() {
        let people = table("people", &[("person_key", "int4"), ("name", "text")]);
        let plan = Planner::new(&people).plan(&options(RawQueryOptions::default())).unwrap();
        assert_eq!(plan.order_by.column, "person_key");
    }

    #[test]
    fn test_default_order_uses_search_column() {
        let users = users();
        let plan = Planner::new(&users).plan(&options(search("name", "bob"))).unwrap();
        assert_eq!(plan.order_by.column, "name");
    }

    #[test]
    fn test_numeric_search_is_equality() {
        let users = users();
        let plan = Planner::new(&users).plan(&options(search("age", "42"))).unwrap();
        assert_eq!(
            plan.predicate,
            Some(SearchPredicate::Equals {
                column: ColumnRef {
                    table: "users".to_string(),
                    column: "age".to_string()
                },
                value: "42".to_string(),
                cast: "int4".to_string(),
            })
        );
    }

    #[test]
    fn test_text_search_is_substring() {
        let users = users();
        let plan = Planner::new(&users).plan(&options(search("name", "bob"))).unwrap();
        match plan.predicate {
            Some(SearchPredicate::Contains { column, pattern }) => {
                assert_eq!(column.column, "name");
                assert_eq!(pattern, "%bob%");
            }
            other => panic!("unexpected predicate: {other:?}"),
        }

        let plan = Planner::new(&users).plan(&options(search("name", "NaN"))).unwrap();
        assert!(matches!(plan.predicate, Some(SearchPredicate::Contains { .. })));
    }

    #[test]
    fn test_unknown_columns_rejected() {
        let users = users();

        let err = Planner::new(&users).plan(&options(search("password", "x"))).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { .. }));

        let raw = RawQueryOptions {
            order_by_column: Some("name; DROP TABLE users".to_string()),
            ..Default::default()
        };
        let err = Planner::new(&users).plan(&options(raw)).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { .. }));
    }

    #[test]
    fn test_join_plan() {
        let orders = table(
            "orders",
            &[("order_id", "int4"), ("customer_id", "int4"), ("amount", "numeric")],
        );
        let joined = vec![table("customers", &[("customer_id", "int4"), ("name", "text")])];
        let joins = vec![JoinSpec {
            join_table: "customers".to_string(),
            table_column: "customer_id".to_string(),
            join_column: "customer_id".to_string(),
        }];

        let raw = RawQueryOptions {
            order_by_column: Some("customers.name".to_string()),
            order_by_direction: Some("DESC".to_string()),
            ..Default::default()
        };
        let plan = Planner::with_joins(&orders, &joined, &joins)
            .plan(&options(raw))
            .unwrap();

        assert_eq!(plan.joins.len(), 1);
        assert_eq!(plan.joins[0].table, "customers");
        let names: Vec<String> = plan
            .columns
            .iter()
            .map(|c| format!("{}.{}", c.column.table, c.column.column))
            .collect();
        assert_eq!(
            names,
            vec![
                "orders.order_id",
                "orders.customer_id",
                "orders.amount",
                "customers.customer_id",
                "customers.name",
            ]
        );
        assert_eq!(plan.joins[0].left.table, "orders");
        assert_eq!(plan.order_by.table, "customers");
        assert_eq!(plan.direction, SortDirection::Desc);

        let plan = Planner::with_joins(&orders, &joined, &joins)
            .plan(&options(RawQueryOptions::default()))
            .unwrap();
        assert_eq!(plan.order_by.table, "orders");
        assert_eq!(plan.order_by.column, "order_id");
    }

    #[test]
    fn test_join_may_reference_prior_join_only() {
        let orders = table("orders", &[("order_id", "int4"), ("customer_id", "int4")]);
        let joined = vec![
            table("customers", &[("customer_id", "int4"), ("region_id", "int4")]),
            table("regions", &[("region_id", "int4"), ("name", "text")]),
        ];
        let joins = vec![
            JoinSpec {
                join_table: "customers".to_string(),
                table_column: "customer_id".to_string(),
                join_column: "customer_id".to_string(),
            },
            JoinSpec {
                join_table: "regions".to_string(),
                table_column: "region_id".to_string(),
                join_column: "customers.region_id".to_string(),
            },
        ];

        let plan = Planner::with_joins(&orders, &joined, &joins)
            .plan(&options(RawQueryOptions::default()))
            .unwrap();
        assert_eq!(plan.joins[1].left.table, "customers");

        let forward = vec![JoinSpec {
            join_table: "customers".to_string(),
            table_column: "customer_id".to_string(),
            join_column: "regions.region_id".to_string(),
        }];
        let err = Planner::with_joins(&orders, &joined[..1], &forward)
            .plan(&options(RawQueryOptions::default()))
            .unwrap_err();
        assert!(matches!(err, Error::TableNotInQuery { .. }));
    }

    #[test]
    fn test_search_limited_to_base_table() {
        let orders = table("orders", &[("order_id", "int4"), ("customer_id", "int4")]);
        let joined = vec![table("customers", &[("customer_id", "int4"), ("name", "text")])];
        let joins = vec![JoinSpec {
            join_table: "customers".to_string(),
            table_column: "customer_id".to_string(),
            join_column: "customer_id".to_string(),
        }];

        let err = Planner::with_joins(&orders, &joined, &joins)
            .plan(&options(search("customers.name", "bob")))
            .unwrap_err();
        assert!(matches!(err, Error::TableNotInQuery { .. }));
    }
}
