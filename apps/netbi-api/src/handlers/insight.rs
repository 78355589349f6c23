//! 洞察 handlers：异常检测、模式识别、预测
//!
//! - GET /fault/insight/anomalies - 时间桶序列上的 Z 分数异常标记
//! - GET /fault/insight/patterns - 趋势/动量/季节性/周期识别
//! - GET /fault/insight/forecast - 日计数序列的向前预测
//!
//! 三个端点对数据不足/数值退化一律返回友好结果（200），不抛 5xx。

use crate::AppState;
use crate::utils::response::{bad_request_error, storage_error};
use crate::utils::validation::filter_from_params;
use api_contract::{
    AnomalyDto, AnomalyFlagDto, AnomalyQuery, ApiResponse, CycleDto, ForecastDto,
    ForecastPointDto, ForecastQuery, MomentumDto, PatternDto, PatternQuery, SeasonalityDto,
    TrendSummaryDto,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::Granularity;
use netbi_analytics::{
    AnomalyOutcome, Confidence, DEFAULT_Z_THRESHOLD, DimensionFilter, aggregate_by_time,
    analyze_patterns, detect_anomalies, forecast_counts,
};

/// 预测期数上限。
const MAX_FORECAST_PERIODS: u64 = 90;

/// 默认预测期数。
const DEFAULT_FORECAST_PERIODS: u64 = 7;

/// 异常检测：计数与平均时长两路 |z| 标记。
pub async fn insight_anomalies(
    State(state): State<AppState>,
    Query(query): Query<AnomalyQuery>,
) -> Response {
    let granularity = match query.granularity.as_deref() {
        None => Granularity::Daily,
        Some(raw) => match Granularity::parse(raw) {
            Some(granularity) => granularity,
            None => {
                return bad_request_error("granularity must be hourly|daily|weekly|monthly");
            }
        },
    };
    let filter = match filter_from_params(
        None,
        None,
        None,
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
    netbi_telemetry::record_anomaly_scan();

    let buckets = aggregate_by_time(&samples, granularity, &DimensionFilter::default());
    let threshold = query.threshold.unwrap_or(DEFAULT_Z_THRESHOLD);
    let data = match detect_anomalies(&buckets, threshold) {
        AnomalyOutcome::InsufficientData { points, required } => AnomalyDto {
            status: "insufficient_data".to_string(),
            threshold: netbi_analytics::clamp_threshold(threshold),
            points: points as u64,
            required: Some(required as u64),
            flags: Vec::new(),
            is_anomaly: false,
        },
        AnomalyOutcome::Report(report) => AnomalyDto {
            status: "ok".to_string(),
            threshold: report.threshold,
            points: report.points as u64,
            required: None,
            flags: report
                .flags
                .into_iter()
                .map(|flag| AnomalyFlagDto {
                    bucket_key: flag.bucket_key,
                    metric: flag.metric.as_str().to_string(),
                    value: flag.value,
                    z_score: flag.z_score,
                })
                .collect(),
            is_anomaly: report.is_anomaly,
        },
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 模式识别：日计数序列上的趋势/动量/季节性/周期。
pub async fn insight_patterns(
    State(state): State<AppState>,
    Query(query): Query<PatternQuery>,
) -> Response {
    let filter = match filter_from_params(
        None,
        None,
        None,
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

    let report = analyze_patterns(&samples);
    let data = PatternDto {
        points: report.points as u64,
        trend: report.trend.map(|trend| TrendSummaryDto {
            direction: trend.direction.as_str().to_string(),
            slope: trend.slope,
        }),
        momentum: report.momentum.map(|momentum| MomentumDto {
            lag1_autocorrelation: momentum.lag1_autocorrelation,
            has_momentum: momentum.has_momentum,
        }),
        seasonality: SeasonalityDto {
            weekday_variation: report.seasonality.weekday_variation,
            weekday_detected: report.seasonality.weekday_detected,
            monthly_variation: report.seasonality.monthly_variation,
            monthly_detected: report.seasonality.monthly_detected,
        },
        cycle: report.cycle.map(|cycle| CycleDto {
            period: cycle.period as u64,
            correlation: cycle.correlation,
        }),
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 预测：日计数序列向前外推 N 期。
pub async fn insight_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Response {
    let periods = query.periods.unwrap_or(DEFAULT_FORECAST_PERIODS);
    if periods == 0 || periods > MAX_FORECAST_PERIODS {
        return bad_request_error("periods must be 1-90");
    }
    let Some(confidence) = Confidence::parse(query.confidence) else {
        return bad_request_error("confidence must be 0.90 or 0.95");
    };
    let filter = match filter_from_params(
        None,
        None,
        None,
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

    let daily = aggregate_by_time(&samples, Granularity::Daily, &DimensionFilter::default());
    let history: Vec<f64> = daily.iter().map(|bucket| bucket.count as f64).collect();
    let forecast = forecast_counts(&history, periods as usize, confidence);
    if forecast.fallback {
        netbi_telemetry::record_forecast_fallback();
    }

    let data = ForecastDto {
        model: forecast.model.as_str().to_string(),
        confidence: forecast.confidence.level(),
        fallback: forecast.fallback,
        trend: forecast.trend.as_str().to_string(),
        stable: forecast.stable,
        points: forecast
            .points
            .into_iter()
            .map(|point| ForecastPointDto {
                predicted: point.predicted,
                lower: point.lower,
                upper: point.upper,
            })
            .collect(),
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}
