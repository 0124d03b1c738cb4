//! 用户实体

use crate::domain::value_objects::UserId;

/// 用户
///
/// `games_played` 和 `score` 在第一次上报游戏状态之前为 `None`，
/// 与"上报过 0"区分开
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub games_played: Option<i32>,
    pub score: Option<i64>,
}

impl User {
    /// 新注册用户，尚无游戏状态
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            games_played: None,
            score: None,
        }
    }

    /// 应用一次状态上报：局数直接覆盖，分数只增不减
    pub fn apply_state(&mut self, games_played: i32, score: i64) {
        self.games_played = Some(games_played);
        self.score = Some(self.score.map_or(score, |current| current.max(score)));
    }
}

/// 列表与好友查询使用的精简投影
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub score: Option<i64>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            score: user.score,
        }
    }
}
