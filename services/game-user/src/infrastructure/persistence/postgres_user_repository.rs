//! PostgreSQL 用户仓储实现

use async_trait::async_trait;
use game_errors::{AppError, AppResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{User, UserSummary};
use crate::domain::repositories::{MAX_FRIENDS_PER_UPDATE, UserRepository};
use crate::domain::value_objects::UserId;

use super::bulk_insert::bulk_insert_sql;

const INSERT_FRIENDS_TEMPLATE: &str =
    "INSERT INTO user_friends (user_id, friend_id) VALUES {} ON CONFLICT DO NOTHING";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    games_played: Option<i32>,
    score: Option<i64>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            games_played: row.games_played,
            score: row.score,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserSummaryRow {
    id: Uuid,
    name: String,
    score: Option<i64>,
}

impl From<UserSummaryRow> for UserSummary {
    fn from(row: UserSummaryRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            score: row.score,
        }
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, name: &str) -> AppResult<User> {
        let user = User::new(name);

        sqlx::query(r#"INSERT INTO "user" (id, name) VALUES ($1, $2)"#)
            .bind(user.id.0)
            .bind(&user.name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create user: {}", e)))?;

        Ok(user)
    }

    async fn find_user(&self, id: &UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, name, games_played, score FROM "user" WHERE id = $1"#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find user {}: {}", id, e)))?;

        Ok(row.map(User::from))
    }

    async fn update_user_state(&self, id: &UserId, games_played: i32, score: i64) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE "user" SET games_played = $1, score = GREATEST(score, $2) WHERE id = $3"#,
        )
        .bind(games_played)
        .bind(score)
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update state of user {}: {}", id, e)))?;

        Ok(())
    }

    async fn update_friends(&self, id: &UserId, friends: &[UserId]) -> AppResult<u64> {
        if friends.len() > MAX_FRIENDS_PER_UPDATE {
            return Err(AppError::validation(format!(
                "too many friends in one request: {} (max {})",
                friends.len(),
                MAX_FRIENDS_PER_UPDATE
            )));
        }

        let Some(sql) = bulk_insert_sql(INSERT_FRIENDS_TEMPLATE, 2, friends.len()) else {
            return Ok(0);
        };

        let mut query = sqlx::query(&sql);
        for friend in friends {
            query = query.bind(id.0).bind(friend.0);
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to add friends of user {}: {}", id, e)))?;

        Ok(result.rows_affected())
    }

    async fn list_friends(&self, id: &UserId) -> AppResult<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummaryRow>(
            r#"
            SELECT u.id, u.name, u.score
            FROM user_friends f
            JOIN "user" u ON u.id = f.friend_id
            WHERE f.user_id = $1
            ORDER BY u.id
            "#,
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list friends of user {}: {}", id, e)))?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }

    // 不分页
    async fn list(&self) -> AppResult<Vec<UserSummary>> {
        let rows = sqlx::query_as::<_, UserSummaryRow>(
            r#"SELECT id, name, score FROM "user" ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list users: {}", e)))?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }
}
