//! 조인 명세

use serde::{Deserialize, Serialize};

/// 조인 명세
///
/// `joinTable.tableColumn = <left>.joinColumn` 을 의미합니다.
/// `joinColumn`은 기본적으로 base 테이블의 컬럼이고, `table.column` 형태로
/// 앞서 조인된 테이블의 컬럼을 가리킬 수도 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSpec {
    /// 조인할 테이블
    pub join_table: String,

    /// 조인 테이블 쪽 컬럼
    pub table_column: String,

    /// 왼쪽(base 또는 이전 조인) 쪽 컬럼
    pub join_column: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_spec_deserialization() {
        let json = r#"[
            { "joinTable": "customers", "tableColumn": "customer_id", "joinColumn": "customer_id" }
        ]"#;

        let joins: Vec<JoinSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].join_table, "customers");
        assert_eq!(joins[0].join_column, "customer_id");
    }
}
