//! information_schema 조회 SQL
//!
//! 카탈로그는 호출마다 새로 읽습니다. 결과는 캐시하지 않습니다.

/// 스키마의 BASE TABLE 목록
///
/// 파라미터: `$1` = 스키마 이름
pub const LIST_TABLES_SQL: &str = "\
SELECT table_name::text AS table_name \
FROM information_schema.tables \
WHERE table_schema = $1 AND table_type = 'BASE TABLE' \
ORDER BY table_name";

/// 테이블 컬럼 목록 (ordinal 순서)
///
/// 파라미터: `$1` = 스키마 이름, `$2` = 테이블 이름
pub const DESCRIBE_TABLE_SQL: &str = "\
SELECT column_name::text AS column_name, \
data_type::text AS data_type, \
udt_name::text AS udt_name, \
(is_nullable = 'YES') AS nullable, \
ordinal_position::int4 AS ordinal \
FROM information_schema.columns \
WHERE table_schema = $1 AND table_name = $2 \
ORDER BY ordinal_position";
