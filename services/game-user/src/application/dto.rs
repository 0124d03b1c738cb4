//! 对外视图
//!
//! 可选数值在这里才折算为 0

use serde::Serialize;

use crate::domain::entities::{User, UserSummary};
use crate::domain::value_objects::UserId;

/// 用户 `{id, name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

impl From<UserSummary> for UserView {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
        }
    }
}

/// 游戏状态 `{gamesPlayed, score}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGameStateView {
    pub games_played: i32,
    pub score: i64,
}

impl From<&User> for UserGameStateView {
    fn from(user: &User) -> Self {
        Self {
            games_played: user.games_played.unwrap_or(0),
            score: user.score.unwrap_or(0),
        }
    }
}

/// 好友 `{id, name, highscore}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendView {
    pub id: UserId,
    pub name: String,
    pub highscore: i64,
}

impl From<UserSummary> for FriendView {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            highscore: summary.score.unwrap_or(0),
        }
    }
}

/// 好友列表 `{friends: [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFriendsView {
    pub friends: Vec<FriendView>,
}
