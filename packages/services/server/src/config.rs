//! 서버 설정

use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::Context;

use tk_sql::PageLimits;

/// 서버 설정
#[derive(Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// Postgres 접속 URL
    pub database_url: String,

    /// 조회 대상 스키마
    pub db_schema: String,

    /// Pool 최대 연결 수
    pub db_max_connections: u32,

    /// Pool 연결 획득 타임아웃
    pub db_acquire_timeout: Duration,

    /// 페이지 크기 기본값/상한
    pub page_limits: PageLimits,
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .context("DATABASE_URL must be set")?;

        let page_limits = PageLimits {
            default_page_size: var("TK_DEFAULT_PAGE_SIZE", "30")
                .parse()
                .context("TK_DEFAULT_PAGE_SIZE must be a positive integer")?,
            max_page_size: var("TK_MAX_PAGE_SIZE", "1000")
                .parse()
                .context("TK_MAX_PAGE_SIZE must be a positive integer")?,
        };
        if page_limits.default_page_size == 0
            || page_limits.default_page_size > page_limits.max_page_size
        {
            anyhow::bail!(
                "TK_DEFAULT_PAGE_SIZE ({}) must be between 1 and TK_MAX_PAGE_SIZE ({})",
                page_limits.default_page_size,
                page_limits.max_page_size
            );
        }

        Ok(Self {
            port: var("TK_PORT", "4000")
                .parse()
                .context("TK_PORT must be a port number")?,

            database_url,

            db_schema: var("TK_DB_SCHEMA", "public"),

            db_max_connections: var("TK_DB_MAX_CONNECTIONS", "5")
                .parse()
                .context("TK_DB_MAX_CONNECTIONS must be a positive integer")?,

            db_acquire_timeout: Duration::from_secs(
                var("TK_DB_ACQUIRE_TIMEOUT_SECS", "5")
                    .parse()
                    .context("TK_DB_ACQUIRE_TIMEOUT_SECS must be a number of seconds")?,
            ),

            page_limits,
        })
    }
}

// 접속 URL에는 비밀번호가 들어 있으므로 로그에 남기지 않음
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("db_schema", &self.db_schema)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout", &self.db_acquire_timeout)
            .field("page_limits", &self.page_limits)
            .finish()
    }
}
