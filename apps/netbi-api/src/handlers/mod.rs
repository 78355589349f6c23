//! Handlers 模块

pub mod analysis;
pub mod drilldown;
pub mod faults;
pub mod insight;
pub mod metrics;
pub mod options;

pub use analysis::*;
pub use drilldown::*;
pub use faults::*;
pub use insight::*;
pub use metrics::*;
pub use options::*;

use axum::{Json, response::IntoResponse};

/// 健康检查
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}
