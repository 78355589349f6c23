//! 运行指标 handler
//!
//! - GET /metrics - 进程指标快照

use api_contract::{ApiResponse, MetricsDto};
use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};

/// 进程指标快照
pub async fn metrics_snapshot() -> Response {
    let snapshot = netbi_telemetry::metrics().snapshot();
    let data = MetricsDto {
        queries_served: snapshot.queries_served,
        records_created: snapshot.records_created,
        records_updated: snapshot.records_updated,
        records_deleted: snapshot.records_deleted,
        rows_imported: snapshot.rows_imported,
        import_row_errors: snapshot.import_row_errors,
        anomaly_scans: snapshot.anomaly_scans,
        forecast_fallbacks: snapshot.forecast_fallbacks,
        distinct_cache_hits: snapshot.distinct_cache_hits,
        distinct_cache_misses: snapshot.distinct_cache_misses,
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}
