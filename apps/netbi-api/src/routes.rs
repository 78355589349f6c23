//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers。
//! 路由包括：
//! - 健康检查：/health
//! - 运行指标：/metrics
//! - 记录管理：/fault/records/*（CRUD、批量删除、导入、导出、搜索）
//! - 概览与分析：/fault/overview, /fault/trend, /fault/categories,
//!   /fault/duration, /fault/proactive
//! - 下钻：/fault/drill/group, /fault/drilldown
//! - 洞察：/fault/insight/anomalies, /fault/insight/patterns,
//!   /fault/insight/forecast
//! - 筛选选项：/fault/options

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_snapshot))
        .route("/fault/records", get(list_faults).post(create_fault))
        .route(
            "/fault/records/:fault_id",
            get(get_fault).put(update_fault).delete(delete_fault),
        )
        .route("/fault/records/batch-delete", post(batch_delete_faults))
        .route("/fault/import", post(import_faults))
        .route("/fault/export", get(export_faults))
        .route("/fault/search", get(search_faults))
        .route("/fault/options", get(filter_options))
        .route("/fault/overview", get(overview))
        .route("/fault/trend", get(trend))
        .route("/fault/categories", get(category_analysis))
        .route("/fault/duration", get(duration_analysis))
        .route("/fault/proactive", get(proactive_analysis))
        .route("/fault/drill/group", get(drill_group))
        .route("/fault/drilldown", get(drilldown_month))
        .route("/fault/insight/anomalies", get(insight_anomalies))
        .route("/fault/insight/patterns", get(insight_patterns))
        .route("/fault/insight/forecast", get(insight_forecast))
}
