//! 服务启动器
//!
//! 所有 HTTP 服务的统一入口

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use game_adapter_postgres::Migration;
use game_config::AppConfig;
use game_errors::AppResult;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::health::{HealthChecker, health_routes};
use crate::http_metrics::{MetricsRecorder, track_http_metrics};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 1. 加载配置并初始化日志
/// 2. 安装 Prometheus recorder
/// 3. 连接数据库（带重试），按配置执行迁移
/// 4. 调用 `router_builder` 构建业务路由，挂上健康检查和 metrics
/// 5. 监听端口，收到 SIGTERM / Ctrl+C 后等待在途请求完成再退出
///
/// ```ignore
/// game_bootstrap::run_http("config", migrations(), |infra| async move {
///     Ok(create_router(AppState::new(infra.postgres_pool())))
/// })
/// .await
/// ```
pub async fn run_http<F, Fut>(
    config_dir: &str,
    migrations: Vec<Migration>,
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = Arc::new(MetricsRecorder::new()?);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let run_migrations = config.database.run_migrations;

    let infra = Infrastructure::from_config(config).await?;

    if run_migrations {
        infra.run_migrations(&migrations).await?;
    } else {
        info!("Migrations disabled by configuration, skipping");
    }

    let checker = Arc::new(HealthChecker::new(infra.postgres_pool()));
    let api = router_builder(infra.clone()).await?;
    let app = build_app(api, checker, metrics);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    infra.close().await;
    info!("Service stopped");

    Ok(())
}

/// 组装完整应用：业务路由 + metrics 中间件 + 健康检查 + 请求追踪
pub fn build_app(api: Router, checker: Arc<HealthChecker>, metrics: Arc<MetricsRecorder>) -> Router {
    api.route_layer(middleware::from_fn(track_http_metrics))
        .merge(health_routes(checker, metrics))
        .layer(TraceLayer::new_for_http())
}
