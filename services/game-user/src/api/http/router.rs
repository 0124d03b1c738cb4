use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers;
use super::state::AppState;

/// 业务路由；健康检查、metrics 和请求追踪由 bootstrap 统一挂载
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/user", post(handlers::create_user).get(handlers::list_users))
        .route(
            "/user/{user_id}/state",
            put(handlers::update_user_state).get(handlers::load_user_state),
        )
        .route(
            "/user/{user_id}/friends",
            put(handlers::update_user_friends).get(handlers::list_user_friends),
        )
        .with_state(state)
}
