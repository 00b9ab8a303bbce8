//! Tablekit Server
//!
//! Postgres 데이터베이스의 테이블을 HTTP로 조회/생성/변경합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod extract;
mod handlers;
mod middleware;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tk_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!("Starting Tablekit with config: {:?}", config);

    // 앱 상태 초기화
    let state = Arc::new(AppState::new(&config)?);

    // 라우터 구성
    let app = create_router(state);

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Tablekit listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// 라우터 생성
fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/read/all-tables", get(handlers::tables::list_tables))
        .route("/read/:table_name", get(handlers::rows::list_rows))
        .route(
            "/read/:table_name/:primary_column/:value",
            get(handlers::rows::get_row),
        )
        .route("/join/:table_name", post(handlers::rows::list_joined_rows))
        .route("/create-table", post(handlers::schema::create_table))
        .route("/update-table", put(handlers::schema::update_table))
        .route(
            "/fk-constraint",
            put(handlers::schema::foreign_key_constraint),
        )
        .route("/delete/:table_name", delete(handlers::schema::drop_table))
        .route(
            "/add-records/:table_name",
            post(handlers::records::add_records),
        );

    Router::new()
        .nest("/api", api)
        // Health check
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(from_fn(middleware::request_id))
        // State
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
