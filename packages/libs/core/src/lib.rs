//! tk-core: Tablekit 공통 핵심 라이브러리
//!
//! 이 크레이트는 SQL 빌더(`tk-sql`)와 서버(`tk-server`)가 공유하는 타입을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `schema`: 테이블 이름 규칙, 컬럼/변경/외래키/조인 명세
//! - `catalog`: `information_schema`에서 읽은 테이블 메타데이터 (식별자 allow-list)
//! - `paging`: 페이지 계산 및 `PagedResult` 응답 형태
//! - `error`: 공통 에러 타입

pub mod catalog;
pub mod error;
pub mod paging;
pub mod schema;

pub use error::{Error, ErrorKind, Result};
pub use paging::{PagedResult, Pagination, Record};
