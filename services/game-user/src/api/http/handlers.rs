//! 请求处理函数

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use super::dto::{CreateUserRequest, UpdateUserFriendsRequest, UpdateUserStateRequest};
use super::error::ApiError;
use super::extract::{JsonBody, UserIdPath};
use super::state::AppState;

type HandlerResult<T> = Result<T, ApiError>;

/// POST /user
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> HandlerResult<impl IntoResponse> {
    let user = state.service.create_user(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /user
pub async fn list_users(State(state): State<AppState>) -> HandlerResult<impl IntoResponse> {
    let users = state.service.list_users().await?;
    Ok(Json(users))
}

/// PUT /user/{user_id}/state
pub async fn update_user_state(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    JsonBody(req): JsonBody<UpdateUserStateRequest>,
) -> HandlerResult<StatusCode> {
    state.service.update_user_state(&id, req.into()).await?;
    Ok(StatusCode::OK)
}

/// GET /user/{user_id}/state
pub async fn load_user_state(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> HandlerResult<impl IntoResponse> {
    let view = state.service.load_user_state(&id).await?;
    Ok(Json(view))
}

/// PUT /user/{user_id}/friends
pub async fn update_user_friends(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    JsonBody(req): JsonBody<UpdateUserFriendsRequest>,
) -> HandlerResult<StatusCode> {
    state.service.update_user_friends(&id, req.into()).await?;
    Ok(StatusCode::CREATED)
}

/// GET /user/{user_id}/friends
pub async fn list_user_friends(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> HandlerResult<impl IntoResponse> {
    let view = state.service.list_user_friends(&id).await?;
    Ok(Json(view))
}
