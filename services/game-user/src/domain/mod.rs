//! 领域层
//!
//! 用户实体、强类型 ID 和仓储接口

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use value_objects::*;
