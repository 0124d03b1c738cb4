//! 启动阶段重试
//!
//! 只用于建立基础设施连接（例如数据库在服务之后才就绪）。
//! 请求处理路径上不做任何重试。

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// 指数退避配置
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// 最大尝试次数（含第一次）
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay,
            ..Default::default()
        }
    }

    /// 第 `attempt` 次失败后的等待时间（从 0 开始）
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(attempt as i32);
        self.initial_delay.mul_f64(factor).min(self.max_delay)
    }
}

/// 执行异步操作，失败时按指数退避重试，返回最后一次的错误
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    info!(operation = operation_name, attempt = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        attempt += 1;
        if attempt >= config.max_attempts {
            warn!(
                operation = operation_name,
                attempts = attempt,
                error = %err,
                "Operation failed, giving up"
            );
            return Err(err);
        }

        let delay = config.backoff(attempt - 1);
        warn!(
            operation = operation_name,
            attempt,
            max_attempts = config.max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Operation failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
