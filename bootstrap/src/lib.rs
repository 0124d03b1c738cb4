//! game-bootstrap - 统一服务启动骨架
//!
//! 配置加载、日志、连接池、迁移、健康检查、metrics 和优雅关闭

mod health;
mod infrastructure;
mod http_metrics;
mod retry;
mod runtime;
mod starter;

pub use health::*;
pub use infrastructure::*;
pub use http_metrics::*;
pub use retry::*;
pub use runtime::*;
pub use starter::*;
