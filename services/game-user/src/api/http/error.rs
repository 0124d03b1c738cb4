//! AppError 到 HTTP 响应的映射

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use game_errors::AppError;
use tracing::{debug, error};

/// HTTP 层错误
///
/// 响应体为 `application/problem+json`；5xx 不带内部细节
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            debug!(error = %err, "Request rejected");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(err.to_problem_details()),
        )
            .into_response()
    }
}
