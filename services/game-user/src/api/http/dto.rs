//! 请求体

use serde::Deserialize;
use uuid::Uuid;

use crate::application::{CreateUserCommand, UpdateUserFriendsCommand, UpdateUserStateCommand};
use crate::domain::value_objects::UserId;

/// `POST /user`
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

impl From<CreateUserRequest> for CreateUserCommand {
    fn from(req: CreateUserRequest) -> Self {
        Self { name: req.name }
    }
}

/// `PUT /user/{userId}/state`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserStateRequest {
    pub games_played: u32,
    pub score: u64,
}

impl From<UpdateUserStateRequest> for UpdateUserStateCommand {
    fn from(req: UpdateUserStateRequest) -> Self {
        Self {
            games_played: req.games_played,
            score: req.score,
        }
    }
}

/// `PUT /user/{userId}/friends`
#[derive(Debug, Deserialize)]
pub struct UpdateUserFriendsRequest {
    pub friends: Vec<Uuid>,
}

impl From<UpdateUserFriendsRequest> for UpdateUserFriendsCommand {
    fn from(req: UpdateUserFriendsRequest) -> Self {
        Self {
            friends: req.friends.into_iter().map(UserId::from).collect(),
        }
    }
}
