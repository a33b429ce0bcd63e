//! 服务层模块
//!
//! 包含核心业务逻辑

pub mod coach;
