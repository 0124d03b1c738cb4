//! 基础设施资源管理
//!
//! 目前只有 PostgreSQL 连接池

use std::sync::Arc;
use std::time::Duration;

use game_adapter_postgres::{Migration, MigrationManager, PostgresConfig, create_pool};
use game_config::AppConfig;
use game_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
///
/// 由 bootstrap 初始化后交给服务构建路由；克隆开销很小
#[derive(Clone)]
pub struct Infrastructure {
    config: Arc<AppConfig>,
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（连接数据库时带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let db = &config.database;
        let pg_config = PostgresConfig::new(db.url.expose_secret())
            .with_max_connections(db.max_connections)
            .with_min_connections(db.min_connections)
            .with_connect_timeout(Duration::from_secs(db.acquire_timeout_secs));

        let postgres_pool = with_retry(&RetryConfig::default(), "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;

        info!(
            max_connections = db.max_connections,
            min_connections = db.min_connections,
            "PostgreSQL connection pool created"
        );

        Ok(Self::new(config, postgres_pool))
    }

    /// 使用已有连接池
    pub fn new(config: AppConfig, postgres_pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            postgres_pool,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 执行数据库迁移，任一迁移失败即返回错误
    pub async fn run_migrations(&self, migrations: &[Migration]) -> AppResult<()> {
        let result = MigrationManager::new(self.postgres_pool.clone())
            .migrate(migrations)
            .await?
            .into_result()?;

        info!(
            applied = result.applied_count(),
            skipped = result.skipped.len(),
            "Database migrations finished"
        );
        Ok(())
    }

    /// 关闭连接池，等待在途连接归还
    pub async fn close(&self) {
        self.postgres_pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}
