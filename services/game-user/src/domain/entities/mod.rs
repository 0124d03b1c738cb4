//! 实体

mod user;

pub use user::{User, UserSummary};
