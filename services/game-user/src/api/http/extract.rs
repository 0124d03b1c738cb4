//! 自定义提取器
//!
//! 所有提取失败都转成 400 problem details，而不是 axum 默认的纯文本拒绝

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use game_errors::AppError;
use serde::de::DeserializeOwned;

use crate::domain::value_objects::UserId;

use super::error::ApiError;

/// 路径中的 `{user_id}`，必须是合法 UUID
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub UserId);

impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let id = raw
            .parse::<UserId>()
            .map_err(|_| AppError::validation(format!("invalid user id: {}", raw)))?;

        Ok(Self(id))
    }
}

/// JSON 请求体
///
/// 不看 `Content-Type`，直接按 JSON 解析原始字节
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("failed to read request body: {}", e.body_text())))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::validation(format!("malformed request body: {}", e)))?;

        Ok(Self(value))
    }
}
