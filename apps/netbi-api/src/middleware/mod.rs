//! Middleware 模块

pub mod context;

pub use context::*;
