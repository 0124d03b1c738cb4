//! 持久化实现

mod bulk_insert;
mod migrations;
mod postgres_user_repository;

pub use bulk_insert::bulk_insert_sql;
pub use migrations::migrations;
pub use postgres_user_repository::PostgresUserRepository;
