//! 概览与趋势分析 handlers
//!
//! - GET /fault/overview - 概览 KPI
//! - GET /fault/trend - 时间分桶趋势（粒度可选）
//! - GET /fault/categories - 三个维度的分类统计
//! - GET /fault/duration - 处理时长分布与月度均值趋势
//! - GET /fault/proactive - 主动发现分布与月度率趋势

use crate::AppState;
use crate::utils::response::{bad_request_error, storage_error};
use crate::utils::validation::filter_from_params;
use api_contract::{
    ApiResponse, CategoryAnalysisDto, CategoryCountDto, DurationAnalysisDto, DurationRangeDto,
    DurationTrendPointDto, OverviewDto, ProactiveAnalysisDto, ProactiveTrendPointDto,
    TimeBucketDto, TrendQuery,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Datelike, Utc};
use domain::{Dimension, Granularity};
use netbi_analytics::{
    CategoryBucket, DimensionFilter, aggregate_by_time, complaint_count, duration_distribution,
    mean_duration, proactive_distribution, proactive_rate, proactive_trend, rollup_by_dimension,
    round2,
};
use netbi_storage::FaultFilter;

fn category_dtos(buckets: Vec<CategoryBucket>) -> Vec<CategoryCountDto> {
    buckets
        .into_iter()
        .map(|bucket| CategoryCountDto {
            name: bucket.name,
            value: bucket.count,
        })
        .collect()
}

/// 概览 KPI：总数、本月数、MTTR、主动发现率。
pub async fn overview(State(state): State<AppState>) -> Response {
    let total_faults = match state.fault_store.count_faults(&FaultFilter::default()).await {
        Ok(total) => total,
        Err(err) => return storage_error(err),
    };

    // 本月：当月 1 日零点起
    let now = Utc::now().naive_utc();
    let month_start = now
        .date()
        .with_day(1)
        .and_then(|date| date.and_hms_opt(0, 0, 0));
    let monthly_filter = FaultFilter {
        date_from: month_start,
        ..FaultFilter::default()
    };
    let monthly_faults = match state.fault_store.count_faults(&monthly_filter).await {
        Ok(total) => total,
        Err(err) => return storage_error(err),
    };

    let samples = match state.fault_store.list_samples(&FaultFilter::default()).await {
        Ok(samples) => samples,
        Err(err) => return storage_error(err),
    };
    netbi_telemetry::record_query_served();

    let data = OverviewDto {
        total_faults,
        monthly_faults,
        avg_duration: mean_duration(&samples).map(round2).unwrap_or(0.0),
        proactive_rate: proactive_rate(&samples).map(round2).unwrap_or(0.0),
        complaint_count: complaint_count(&samples),
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 时间分桶趋势：粒度 hourly|daily|weekly|monthly，缺省 monthly。
pub async fn trend(State(state): State<AppState>, Query(query): Query<TrendQuery>) -> Response {
    let granularity = match query.granularity.as_deref() {
        None => Granularity::Monthly,
        Some(raw) => match Granularity::parse(raw) {
            Some(granularity) => granularity,
            None => {
                return bad_request_error("granularity must be hourly|daily|weekly|monthly");
            }
        },
    };
    let filter = match filter_from_params(
        query.fault_type,
        query.cause_category,
        query.notification_level,
        None,
        query.start_date,
        query.end_date,
        None,
    ) {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    let samples = match state.fault_store.list_samples(&filter).await {
        Ok(samples) => samples,
        Err(err) => return storage_error(err),
    };
    netbi_telemetry::record_query_served();

    let buckets = aggregate_by_time(&samples, granularity, &DimensionFilter::default());
    let data: Vec<TimeBucketDto> = buckets
        .into_iter()
        .map(|bucket| TimeBucketDto {
            date: bucket.bucket_key,
            count: bucket.count,
            duration_sum: round2(bucket.duration_sum),
            avg_duration: bucket.avg_duration.map(round2),
        })
        .collect();
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 分类统计：原因分类 / 故障类型 / 通报级别。
pub async fn category_analysis(State(state): State<AppState>) -> Response {
    let samples = match state.fault_store.list_samples(&FaultFilter::default()).await {
        Ok(samples) => samples,
        Err(err) => return storage_error(err),
    };
    netbi_telemetry::record_query_served();

    let data = CategoryAnalysisDto {
        cause_category: category_dtos(rollup_by_dimension(&samples, Dimension::CauseCategory)),
        fault_type: category_dtos(rollup_by_dimension(&samples, Dimension::FaultType)),
        notification_level: category_dtos(rollup_by_dimension(
            &samples,
            Dimension::NotificationLevel,
        )),
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 处理时长分析：固定区间分布 + 月度平均时长趋势。
pub async fn duration_analysis(State(state): State<AppState>) -> Response {
    let samples = match state.fault_store.list_samples(&FaultFilter::default()).await {
        Ok(samples) => samples,
        Err(err) => return storage_error(err),
    };
    netbi_telemetry::record_query_served();

    let distribution: Vec<DurationRangeDto> = duration_distribution(&samples)
        .into_iter()
        .map(|entry| DurationRangeDto {
            range: entry.range.to_string(),
            count: entry.count,
        })
        .collect();

    // 月度平均时长：只输出有时长数据的月份
    let duration_trend: Vec<DurationTrendPointDto> =
        aggregate_by_time(&samples, Granularity::Monthly, &DimensionFilter::default())
            .into_iter()
            .filter_map(|bucket| {
                bucket.avg_duration.map(|avg| DurationTrendPointDto {
                    date: bucket.bucket_key,
                    avg_duration: round2(avg),
                })
            })
            .collect();

    let data = DurationAnalysisDto {
        duration_distribution: distribution,
        duration_trend,
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 主动发现分析：标志分布 + 月度率趋势。
pub async fn proactive_analysis(State(state): State<AppState>) -> Response {
    let samples = match state.fault_store.list_samples(&FaultFilter::default()).await {
        Ok(samples) => samples,
        Err(err) => return storage_error(err),
    };
    netbi_telemetry::record_query_served();

    let trend: Vec<ProactiveTrendPointDto> = proactive_trend(&samples)
        .into_iter()
        .map(|point| ProactiveTrendPointDto {
            date: point.date,
            proactive_rate: point.rate,
            proactive_count: point.proactive_count,
            total_count: point.total_count,
        })
        .collect();

    let data = ProactiveAnalysisDto {
        proactive_distribution: category_dtos(proactive_distribution(&samples)),
        proactive_trend: trend,
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}
