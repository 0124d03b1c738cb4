//! Commands

mod user_commands;

pub use user_commands::*;
