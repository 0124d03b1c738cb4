//! Application layer

pub mod commands;
pub mod dto;
pub mod service;

pub use commands::*;
pub use dto::*;
pub use service::UserService;
