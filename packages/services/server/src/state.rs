//! 서버 앱 상태

use crate::config::Config;
use crate::db::AdminDb;

/// 앱 상태
///
/// 모든 핸들러에서 공유하는 상태입니다.
pub struct AppState {
    /// DB 엔진 (Pool 포함)
    pub db: AdminDb,
}

impl AppState {
    /// 새 상태 생성
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            db: AdminDb::connect(config)?,
        })
    }
}
