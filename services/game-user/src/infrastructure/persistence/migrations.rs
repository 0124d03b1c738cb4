//! 数据库迁移

use game_adapter_postgres::Migration;

/// 本服务的全部迁移，按版本号排列
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "create_user",
            include_str!("../../../migrations/0001_create_user.sql"),
        ),
        Migration::new(
            2,
            "create_user_friends",
            include_str!("../../../migrations/0002_create_user_friends.sql"),
        ),
    ]
}
