//! 故障指标分析服务入口：配置加载、存储装配、路由挂载。

mod handlers;
mod middleware;
mod routes;
mod utils;

use netbi_config::{AppConfig, StoreBackend};
use netbi_storage::{DistinctValueCache, FaultStore, InMemoryFaultStore, PgFaultStore};
use netbi_telemetry::init_tracing;
use std::sync::Arc;
use std::time::Duration;

/// 应用共享状态：存储、去重值缓存与分页配置。
#[derive(Clone)]
pub struct AppState {
    pub fault_store: Arc<dyn FaultStore>,
    pub distinct_cache: Arc<DistinctValueCache>,
    pub distinct_value_limit: u64,
    pub page_size: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    // 存储后端：生产走 Postgres，演示/测试走内存
    let fault_store: Arc<dyn FaultStore> = match (config.store_backend, &config.database_url) {
        (StoreBackend::Postgres, Some(database_url)) => {
            Arc::new(PgFaultStore::connect(database_url).await?)
        }
        (StoreBackend::Postgres, None) => {
            return Err("NETBI_DATABASE_URL required for postgres backend".into());
        }
        (StoreBackend::Memory, _) => Arc::new(InMemoryFaultStore::new()),
    };
    tracing::info!(backend = ?config.store_backend, "fault store ready");

    let state = AppState {
        fault_store,
        distinct_cache: Arc::new(DistinctValueCache::new(Duration::from_secs(
            config.distinct_cache_ttl_seconds,
        ))),
        distinct_value_limit: config.distinct_value_limit,
        page_size: config.page_size,
    };

    let app = routes::create_api_router()
        .with_state(state)
        // 注入 request_id/trace_id
        .layer(axum::middleware::from_fn(middleware::request_context))
        // HTTP 层访问日志
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    tracing::info!(addr = %config.http_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
