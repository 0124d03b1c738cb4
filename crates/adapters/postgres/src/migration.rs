//! 版本化迁移
//!
//! 迁移记录在 `_migrations` 表中，带 SHA-256 校验和；已应用的迁移被修改时拒绝启动。
//! 每个迁移在独立事务中执行，并持有事务级 advisory lock，多实例同时启动也只会执行一次。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use game_errors::{AppError, AppResult};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::{debug, info, warn};

const MIGRATIONS_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS _migrations (
    version    BIGINT PRIMARY KEY,
    name       TEXT NOT NULL,
    checksum   CHAR(64) NOT NULL,
    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// advisory lock 的键，所有使用本模块的服务共享
const MIGRATION_LOCK_KEY: i64 = 0x6761_6d65_6d69_6772;

/// 一条迁移
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
    /// `up_sql` 的 SHA-256（十六进制）
    pub checksum: String,
}

impl Migration {
    pub fn new(version: i64, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        Self {
            version,
            name: name.into(),
            checksum: hex::encode(Sha256::digest(up_sql.as_bytes())),
            up_sql,
        }
    }
}

/// `_migrations` 中的一行
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub checksum: String,
    pub applied_at: DateTime<Utc>,
}

/// 迁移失败
#[derive(Debug, Clone)]
pub struct MigrationError {
    pub version: i64,
    pub name: String,
    pub error: String,
}

/// 一次 `migrate` 的结果
#[derive(Debug, Clone, Default)]
pub struct MigrationResult {
    pub applied: Vec<i64>,
    pub skipped: Vec<i64>,
    pub errors: Vec<MigrationError>,
}

impl MigrationResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// 有错误时转换为 `AppError::Internal`（取第一个错误）
    pub fn into_result(self) -> AppResult<Self> {
        match self.errors.first() {
            None => Ok(self),
            Some(e) => Err(AppError::internal(format!(
                "Migration {} ({}) failed: {}",
                e.version, e.name, e.error
            ))),
        }
    }
}

/// 对比已应用记录，得出待执行的迁移（按版本升序）
///
/// 校验和不一致的迁移记入 `errors`，此时不会有任何待执行项
fn plan<'a>(applied: &[AppliedMigration], migrations: &'a [Migration]) -> (Vec<&'a Migration>, MigrationResult) {
    let applied: HashMap<i64, &AppliedMigration> = applied.iter().map(|r| (r.version, r)).collect();

    let mut ordered: Vec<&Migration> = migrations.iter().collect();
    ordered.sort_by_key(|m| m.version);

    let mut result = MigrationResult::default();
    let mut pending = Vec::new();

    for migration in ordered {
        match applied.get(&migration.version) {
            Some(record) if record.checksum.trim() != migration.checksum => {
                result.errors.push(MigrationError {
                    version: migration.version,
                    name: migration.name.clone(),
                    error: "checksum mismatch, an applied migration was modified".to_string(),
                });
            }
            Some(_) => result.skipped.push(migration.version),
            None => pending.push(migration),
        }
    }

    if !result.is_success() {
        pending.clear();
    }
    (pending, result)
}

/// 迁移执行器
pub struct MigrationManager {
    pool: PgPool,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 执行所有待处理的迁移；遇到第一个失败即停止
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<MigrationResult> {
        sqlx::raw_sql(MIGRATIONS_TABLE_DDL)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create migration table: {}", e)))?;

        let applied = self.applied().await?;
        let (pending, mut result) = plan(&applied, migrations);

        for migration in pending {
            match self.apply(migration).await {
                Ok(true) => result.applied.push(migration.version),
                Ok(false) => result.skipped.push(migration.version),
                Err(e) => {
                    result.errors.push(MigrationError {
                        version: migration.version,
                        name: migration.name.clone(),
                        error: e.to_string(),
                    });
                    break;
                }
            }
        }

        for e in &result.errors {
            warn!(version = e.version, name = %e.name, error = %e.error, "Migration failed");
        }
        if result.is_success() && result.applied.is_empty() {
            info!(skipped = result.skipped.len(), "Database schema is up to date");
        }

        Ok(result)
    }

    /// 已应用的迁移，按版本升序
    pub async fn applied(&self) -> AppResult<Vec<AppliedMigration>> {
        sqlx::query_as::<_, AppliedMigration>(
            "SELECT version, name, checksum, applied_at FROM _migrations ORDER BY version",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to read applied migrations: {}", e)))
    }

    /// 在事务中执行一条迁移；其他实例已经执行过时返回 `false`
    async fn apply(&self, migration: &Migration) -> AppResult<bool> {
        let db_err = |action: &str, e: sqlx::Error| {
            AppError::database(format!("Failed to {} migration {}: {}", action, migration.version, e))
        };

        let mut tx = self.pool.begin().await.map_err(|e| db_err("begin", e))?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(MIGRATION_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("lock", e))?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT version FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_err("check", e))?;
        if exists.is_some() {
            debug!(version = migration.version, "Migration applied concurrently, skipping");
            return Ok(false);
        }

        // 迁移文件可能包含多条语句，走简单查询协议
        sqlx::raw_sql(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("apply", e))?;

        sqlx::query("INSERT INTO _migrations (version, name, checksum) VALUES ($1, $2, $3)")
            .bind(migration.version)
            .bind(&migration.name)
            .bind(&migration.checksum)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("record", e))?;

        tx.commit().await.map_err(|e| db_err("commit", e))?;

        info!(version = migration.version, name = %migration.name, "Migration applied");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(migration: &Migration) -> AppliedMigration {
        AppliedMigration {
            version: migration.version,
            name: migration.name.clone(),
            checksum: migration.checksum.clone(),
            applied_at: Utc::now(),
        }
    }

    #[test]
    fn test_checksum_is_sha256_hex() {
        let migration = Migration::new(1, "empty", "");
        assert_eq!(
            migration.checksum,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_checksum_follows_sql() {
        let a = Migration::new(1, "t", "CREATE TABLE a (id INT)");
        let b = Migration::new(1, "t", "CREATE TABLE a (id INT)");
        let c = Migration::new(1, "t", "CREATE TABLE c (id INT)");

        assert_eq!(a.checksum, b.checksum);
        assert_ne!(a.checksum, c.checksum);
    }

    #[test]
    fn test_plan_orders_pending_by_version() {
        let migrations = vec![
            Migration::new(2, "create_user_friends", "CREATE TABLE f ()"),
            Migration::new(1, "create_user", "CREATE TABLE u ()"),
        ];

        let (pending, result) = plan(&[], &migrations);

        let versions: Vec<i64> = pending.iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![1, 2]);
        assert!(result.is_success());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_plan_skips_applied() {
        let migrations = vec![
            Migration::new(1, "create_user", "CREATE TABLE u ()"),
            Migration::new(2, "create_user_friends", "CREATE TABLE f ()"),
        ];
        let applied = vec![record(&migrations[0])];

        let (pending, result) = plan(&applied, &migrations);

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].version, 2);
        assert_eq!(result.skipped, vec![1]);
    }

    #[test]
    fn test_plan_rejects_modified_migration() {
        let original = Migration::new(1, "create_user", "CREATE TABLE u ()");
        let modified = vec![
            Migration::new(1, "create_user", "CREATE TABLE u (id UUID)"),
            Migration::new(2, "create_user_friends", "CREATE TABLE f ()"),
        ];

        let (pending, result) = plan(&[record(&original)], &modified);

        assert!(pending.is_empty());
        assert!(!result.is_success());
        assert_eq!(result.errors[0].version, 1);
    }

    #[test]
    fn test_failed_result_into_error() {
        let result = MigrationResult {
            applied: vec![1],
            skipped: vec![],
            errors: vec![MigrationError {
                version: 2,
                name: "create_user_friends".to_string(),
                error: "syntax error".to_string(),
            }],
        };

        let err = result.into_result().unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(err.to_string().contains("create_user_friends"));
    }

    #[test]
    fn test_successful_result_into_ok() {
        let result = MigrationResult {
            applied: vec![1, 2],
            ..Default::default()
        };

        assert_eq!(result.into_result().unwrap().applied_count(), 2);
    }
}
