//! 用户仓储接口

use async_trait::async_trait;
use game_errors::AppResult;

use crate::domain::entities::{User, UserSummary};
use crate::domain::value_objects::UserId;

/// 单次好友写入的上限
///
/// 每条边占两个绑定参数，PostgreSQL 单条语句最多 65535 个
pub const MAX_FRIENDS_PER_UPDATE: usize = u16::MAX as usize / 2;

/// 用户仓储接口
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 创建用户，ID 由仓储生成
    async fn create(&self, name: &str) -> AppResult<User>;

    /// 根据 ID 查找用户，不存在返回 `None`
    async fn find_user(&self, id: &UserId) -> AppResult<Option<User>>;

    /// 写入游戏状态：局数覆盖，分数取最大值
    ///
    /// 不检查用户是否存在，由调用方保证
    async fn update_user_state(&self, id: &UserId, games_played: i32, score: i64) -> AppResult<()>;

    /// 批量添加好友（有向边），已存在的边忽略；返回实际新增的条数
    async fn update_friends(&self, id: &UserId, friends: &[UserId]) -> AppResult<u64>;

    /// 用户的好友列表，只包含存在的用户
    async fn list_friends(&self, id: &UserId) -> AppResult<Vec<UserSummary>>;

    /// 全部用户
    async fn list(&self) -> AppResult<Vec<UserSummary>>;
}
