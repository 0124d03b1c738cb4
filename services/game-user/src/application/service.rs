//! 用户业务逻辑

use std::sync::Arc;

use game_errors::{AppError, AppResult};
use tracing::{debug, info, warn};

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::domain::value_objects::UserId;

use super::commands::*;
use super::dto::*;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// 创建用户
    pub async fn create_user(&self, cmd: CreateUserCommand) -> AppResult<UserView> {
        let user = self.repo.create(&cmd.name).await.inspect_err(|e| {
            warn!(error = %e, "Failed to create user");
        })?;

        info!(user_id = %user.id, "User created");
        Ok(user.into())
    }

    /// 全部用户
    pub async fn list_users(&self) -> AppResult<Vec<UserView>> {
        let users = self.repo.list().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    /// 上报游戏状态，用户不存在时不写库
    pub async fn update_user_state(&self, id: &UserId, cmd: UpdateUserStateCommand) -> AppResult<()> {
        let (games_played, score) = cmd.to_storage()?;
        self.require_user(id).await?;

        self.repo
            .update_user_state(id, games_played, score)
            .await
            .inspect_err(|e| warn!(user_id = %id, error = %e, "Failed to update user state"))?;

        debug!(user_id = %id, games_played, score, "User state updated");
        Ok(())
    }

    /// 读取游戏状态
    pub async fn load_user_state(&self, id: &UserId) -> AppResult<UserGameStateView> {
        let user = self.require_user(id).await?;
        Ok(UserGameStateView::from(&user))
    }

    /// 添加好友；不检查主体用户是否存在
    pub async fn update_user_friends(&self, id: &UserId, cmd: UpdateUserFriendsCommand) -> AppResult<u64> {
        cmd.validate()?;

        let inserted = self
            .repo
            .update_friends(id, &cmd.friends)
            .await
            .inspect_err(|e| warn!(user_id = %id, error = %e, "Failed to update user friends"))?;

        debug!(
            user_id = %id,
            requested = cmd.friends.len(),
            inserted,
            "User friends updated"
        );
        Ok(inserted)
    }

    /// 好友列表
    pub async fn list_user_friends(&self, id: &UserId) -> AppResult<UserFriendsView> {
        self.require_user(id).await?;

        let friends = self.repo.list_friends(id).await?;
        Ok(UserFriendsView {
            friends: friends.into_iter().map(FriendView::from).collect(),
        })
    }

    async fn require_user(&self, id: &UserId) -> AppResult<User> {
        self.repo
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("no user with id {} found", id)))
    }
}
