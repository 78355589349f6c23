//! 内存存储实现模块
//!
//! 用于本地演示和测试。
//!
//! 包含以下实现：
//! - FaultStore: InMemoryFaultStore

pub mod fault;

pub use fault::*;
