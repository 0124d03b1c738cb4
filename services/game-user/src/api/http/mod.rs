//! HTTP 接口

mod dto;
mod error;
mod extract;
mod handlers;
mod router;
mod state;

pub use dto::*;
pub use error::ApiError;
pub use extract::{JsonBody, UserIdPath};
pub use router::create_router;
pub use state::AppState;
