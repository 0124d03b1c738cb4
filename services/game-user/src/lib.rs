//! game-user - 玩家、游戏状态与好友关系服务

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
