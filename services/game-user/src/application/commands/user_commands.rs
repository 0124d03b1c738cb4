//! User commands

use game_errors::{AppError, AppResult};

use crate::domain::repositories::MAX_FRIENDS_PER_UPDATE;
use crate::domain::value_objects::UserId;

/// 创建用户命令
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: String,
}

/// 上报游戏状态命令
///
/// 线上协议是无符号数，落库前需要放得进 INTEGER / BIGINT
#[derive(Debug, Clone, Copy)]
pub struct UpdateUserStateCommand {
    pub games_played: u32,
    pub score: u64,
}

impl UpdateUserStateCommand {
    /// 转换为存储类型 `(games_played, score)`
    pub fn to_storage(&self) -> AppResult<(i32, i64)> {
        let games_played = i32::try_from(self.games_played).map_err(|_| {
            AppError::validation(format!("gamesPlayed {} is out of range", self.games_played))
        })?;
        let score = i64::try_from(self.score)
            .map_err(|_| AppError::validation(format!("score {} is out of range", self.score)))?;
        Ok((games_played, score))
    }
}

/// 添加好友命令
#[derive(Debug, Clone)]
pub struct UpdateUserFriendsCommand {
    pub friends: Vec<UserId>,
}

impl UpdateUserFriendsCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.friends.len() > MAX_FRIENDS_PER_UPDATE {
            return Err(AppError::validation(format!(
                "too many friends in one request: {} (max {})",
                self.friends.len(),
                MAX_FRIENDS_PER_UPDATE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_within_range() {
        let cmd = UpdateUserStateCommand {
            games_played: 42,
            score: 358,
        };
        assert_eq!(cmd.to_storage().unwrap(), (42, 358));
    }

    #[test]
    fn test_games_played_out_of_range() {
        let cmd = UpdateUserStateCommand {
            games_played: u32::MAX,
            score: 0,
        };
        assert!(matches!(cmd.to_storage(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_score_out_of_range() {
        let cmd = UpdateUserStateCommand {
            games_played: 0,
            score: u64::MAX,
        };
        assert!(matches!(cmd.to_storage(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_friend_list_limit() {
        let at_limit = UpdateUserFriendsCommand {
            friends: vec![UserId::new(); MAX_FRIENDS_PER_UPDATE],
        };
        assert!(at_limit.validate().is_ok());

        let over = UpdateUserFriendsCommand {
            friends: vec![UserId::new(); MAX_FRIENDS_PER_UPDATE + 1],
        };
        assert!(matches!(over.validate(), Err(AppError::Validation(_))));
    }
}
