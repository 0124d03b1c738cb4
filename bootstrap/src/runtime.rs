//! 服务运行时

use game_config::AppConfig;
use game_telemetry::{LogFormat, init_tracing};
use tracing::{error, info, warn};

/// 初始化服务运行时
pub fn init_runtime(config: &AppConfig) {
    let format = if config.use_json_logs() {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };

    if let Err(e) = init_tracing(&config.telemetry.log_level, format) {
        // 已有全局 subscriber（例如测试进程内），沿用即可
        warn!(error = %e, "Tracing subscriber already installed");
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        log_format = ?format,
        "Runtime initialized"
    );
}

/// 等待关闭信号（Ctrl+C 或 SIGTERM）
///
/// 信号监听安装失败时只记录错误，另一路信号仍然有效
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("Shutting down, draining in-flight requests");
}
