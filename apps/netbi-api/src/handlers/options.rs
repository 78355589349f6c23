//! 筛选选项 handlers
//!
//! - GET /fault/options - 三个维度的去重值（下拉选项）
//!
//! 去重值为读多写少的参考数据，经由进程内 TTL 缓存；
//! 写入路径（faults.rs）负责失效。

use crate::AppState;
use crate::utils::response::storage_error;
use api_contract::{ApiResponse, FilterOptionsDto};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::Dimension;
use netbi_storage::StorageError;

async fn cached_distinct(state: &AppState, dimension: Dimension) -> Result<Vec<String>, StorageError> {
    if let Some(values) = state.distinct_cache.get(dimension) {
        netbi_telemetry::record_distinct_cache_hit();
        return Ok(values);
    }
    netbi_telemetry::record_distinct_cache_miss();
    let values = state
        .fault_store
        .distinct_values(dimension, state.distinct_value_limit)
        .await?;
    state.distinct_cache.put(dimension, values.clone());
    Ok(values)
}

/// 筛选下拉选项
pub async fn filter_options(State(state): State<AppState>) -> Response {
    let fault_types = match cached_distinct(&state, Dimension::FaultType).await {
        Ok(values) => values,
        Err(err) => return storage_error(err),
    };
    let cause_categories = match cached_distinct(&state, Dimension::CauseCategory).await {
        Ok(values) => values,
        Err(err) => return storage_error(err),
    };
    let notification_levels = match cached_distinct(&state, Dimension::NotificationLevel).await {
        Ok(values) => values,
        Err(err) => return storage_error(err),
    };
    let data = FilterOptionsDto {
        fault_types,
        cause_categories,
        notification_levels,
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}
