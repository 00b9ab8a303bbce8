//! tk-sql: 동적 SQL 생성 라이브러리
//!
//! 런타임에 받은 테이블/컬럼 이름과 옵션으로 SQL을 생성합니다.
//! SeaQuery를 사용해 식별자를 인용하고, 모든 리터럴은 바인딩 파라미터로 넘깁니다.
//! 이 크레이트는 I/O를 하지 않습니다. 실행은 서버가 담당합니다.
//!
//! # 모듈 구조
//!
//! - `ident`: 식별자/타입 이름 검증 (Sanitizer)
//! - `params`: 쿼리 옵션 파싱/검증
//! - `planner`: 페이지/정렬/검색 조건 계획
//! - `builder`: SELECT/COUNT/INSERT 빌더
//! - `catalog`: 카탈로그 조회 SQL
//! - `ddl`: DDL(CREATE/ALTER/DROP TABLE, 외래키) 생성기

pub mod builder;
pub mod catalog;
pub mod ddl;
pub mod ident;
pub mod params;
pub mod planner;

pub use builder::{CountBuilder, GetOneBuilder, InsertBuilder, JoinSelectBuilder, SelectBuilder};
pub use ddl::DdlGenerator;
pub use params::{PageLimits, QueryOptions, RawQueryOptions, SortDirection};
pub use planner::{Planner, ReadPlan};
