//! 领域模型

pub mod log;
pub mod schedule;
pub mod workout;
