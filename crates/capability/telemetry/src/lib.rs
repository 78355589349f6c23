//! 追踪与请求 ID 生成。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub queries_served: u64,
    pub records_created: u64,
    pub records_updated: u64,
    pub records_deleted: u64,
    pub rows_imported: u64,
    pub import_row_errors: u64,
    pub anomaly_scans: u64,
    pub forecast_fallbacks: u64,
    pub distinct_cache_hits: u64,
    pub distinct_cache_misses: u64,
}

/// 基础指标。
pub struct TelemetryMetrics {
    queries_served: AtomicU64,
    records_created: AtomicU64,
    records_updated: AtomicU64,
    records_deleted: AtomicU64,
    rows_imported: AtomicU64,
    import_row_errors: AtomicU64,
    anomaly_scans: AtomicU64,
    forecast_fallbacks: AtomicU64,
    distinct_cache_hits: AtomicU64,
    distinct_cache_misses: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            queries_served: AtomicU64::new(0),
            records_created: AtomicU64::new(0),
            records_updated: AtomicU64::new(0),
            records_deleted: AtomicU64::new(0),
            rows_imported: AtomicU64::new(0),
            import_row_errors: AtomicU64::new(0),
            anomaly_scans: AtomicU64::new(0),
            forecast_fallbacks: AtomicU64::new(0),
            distinct_cache_hits: AtomicU64::new(0),
            distinct_cache_misses: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_served: self.queries_served.load(Ordering::Relaxed),
            records_created: self.records_created.load(Ordering::Relaxed),
            records_updated: self.records_updated.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            rows_imported: self.rows_imported.load(Ordering::Relaxed),
            import_row_errors: self.import_row_errors.load(Ordering::Relaxed),
            anomaly_scans: self.anomaly_scans.load(Ordering::Relaxed),
            forecast_fallbacks: self.forecast_fallbacks.load(Ordering::Relaxed),
            distinct_cache_hits: self.distinct_cache_hits.load(Ordering::Relaxed),
            distinct_cache_misses: self.distinct_cache_misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录分析/列表查询次数。
pub fn record_query_served() {
    metrics().queries_served.fetch_add(1, Ordering::Relaxed);
}

/// 记录创建记录次数。
pub fn record_record_created() {
    metrics().records_created.fetch_add(1, Ordering::Relaxed);
}

/// 记录更新记录次数。
pub fn record_record_updated() {
    metrics().records_updated.fetch_add(1, Ordering::Relaxed);
}

/// 记录删除记录条数（含批量删除）。
pub fn record_records_deleted(count: u64) {
    metrics().records_deleted.fetch_add(count, Ordering::Relaxed);
}

/// 记录批量导入成功行数。
pub fn record_rows_imported(count: u64) {
    metrics().rows_imported.fetch_add(count, Ordering::Relaxed);
}

/// 记录批量导入失败行数。
pub fn record_import_row_errors(count: u64) {
    metrics()
        .import_row_errors
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录异常检测执行次数。
pub fn record_anomaly_scan() {
    metrics().anomaly_scans.fetch_add(1, Ordering::Relaxed);
}

/// 记录预测兜底次数。
pub fn record_forecast_fallback() {
    metrics()
        .forecast_fallbacks
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录去重值缓存命中。
pub fn record_distinct_cache_hit() {
    metrics()
        .distinct_cache_hits
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录去重值缓存未命中。
pub fn record_distinct_cache_miss() {
    metrics()
        .distinct_cache_misses
        .fetch_add(1, Ordering::Relaxed);
}
