//! PostgreSQL 存储实现模块
//!
//! 生产环境使用。
//!
//! 包含以下实现：
//! - FaultStore: PgFaultStore

pub mod fault;

pub use fault::*;
