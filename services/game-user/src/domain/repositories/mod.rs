//! 仓储接口模块

mod user_repository;

pub use user_repository::{MAX_FRIENDS_PER_UPDATE, UserRepository};
