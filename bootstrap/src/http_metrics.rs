//! HTTP 请求 metrics
//!
//! 按 method / 路由模板 / 状态码记录请求数和耗时

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use game_errors::{AppError, AppResult};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusHandle;

/// Metrics 记录器
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus recorder
    pub fn new() -> AppResult<Self> {
        let handle = game_telemetry::init_metrics()
            .map_err(|e| AppError::internal(format!("Failed to install Prometheus recorder: {}", e)))?;
        Ok(Self { handle })
    }

    /// 使用已有的 handle（不安装全局 recorder）
    pub fn from_handle(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// Prometheus 文本格式
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 记录一次 HTTP 请求
pub fn record_http_request(method: &str, path: &str, status: u16, duration_ms: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_ms", &labels).record(duration_ms);
}

/// 请求 metrics 中间件
///
/// 用 `route_layer` 挂载，才能拿到 `MatchedPath`；path 标签使用路由模板，避免用户 ID 撑爆基数
pub async fn track_http_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    record_http_request(&method, &path, response.status().as_u16(), elapsed);

    response
}
