//! 下钻 handlers
//!
//! - GET /fault/drill/group - 按维度分组聚合（计数/时长和/MTTR）
//! - GET /fault/drilldown - 月度多维下钻
//!   （帕累托/箱线图/控制图/热力图/级别对比）

use crate::AppState;
use crate::utils::response::{bad_request_error, storage_error};
use crate::utils::validation::normalize_optional;
use api_contract::{
    ApiResponse, BoxplotDto, ControlChartDto, DrillGroupQuery, DrilldownDto, DrilldownQuery,
    GroupBucketDto, GroupCompareDto, ParetoDto,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Datelike, Duration, NaiveDate};
use domain::Dimension;
use netbi_analytics::{drilldown, round2, rollup_with_duration};
use netbi_storage::FaultFilter;

/// 分组下钻：group_by 仅允许 notification_level / cause_category。
pub async fn drill_group(
    State(state): State<AppState>,
    Query(query): Query<DrillGroupQuery>,
) -> Response {
    let dimension = match Dimension::parse(&query.group_by) {
        Some(dimension @ (Dimension::NotificationLevel | Dimension::CauseCategory)) => dimension,
        _ => {
            return bad_request_error(
                "groupBy must be notification_level|cause_category",
            );
        }
    };
    let filter = FaultFilter {
        notification_level: normalize_optional(query.notification_level),
        cause_category: normalize_optional(query.cause_category),
        ..FaultFilter::default()
    };
    let samples = match state.fault_store.list_samples(&filter).await {
        Ok(samples) => samples,
        Err(err) => return storage_error(err),
    };
    netbi_telemetry::record_query_served();

    let buckets: Vec<GroupBucketDto> = rollup_with_duration(&samples, dimension)
        .into_iter()
        .map(|bucket| GroupBucketDto {
            key: bucket.key,
            count: bucket.count,
            duration_sum: round2(bucket.duration_sum),
            mttr: bucket.mttr.map(round2).unwrap_or(0.0),
        })
        .collect();
    (StatusCode::OK, Json(ApiResponse::success(buckets))).into_response()
}

/// 解析 YYYY-MM，返回 [月初, 月末] 的含端点过滤区间。
fn month_bounds(month: &str) -> Option<FaultFilter> {
    let trimmed = month.trim();
    // 只接受 YYYY-MM；补上 -01 后交给 chrono 校验月份合法性
    if trimmed.len() != 7 {
        return None;
    }
    let first_day = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok()?;
    let next_month = if first_day.month() == 12 {
        NaiveDate::from_ymd_opt(first_day.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first_day.year(), first_day.month() + 1, 1)?
    };
    let start = first_day.and_hms_opt(0, 0, 0)?;
    let end = next_month.and_hms_opt(0, 0, 0)? - Duration::seconds(1);
    Some(FaultFilter {
        date_from: Some(start),
        date_to: Some(end),
        ..FaultFilter::default()
    })
}

/// 月度多维下钻。
pub async fn drilldown_month(
    State(state): State<AppState>,
    Query(query): Query<DrilldownQuery>,
) -> Response {
    let Some(filter) = month_bounds(&query.month) else {
        return bad_request_error("month must be YYYY-MM");
    };
    let samples = match state.fault_store.list_samples(&filter).await {
        Ok(samples) => samples,
        Err(err) => return storage_error(err),
    };
    netbi_telemetry::record_query_served();

    let report = drilldown(&samples);
    let data = DrilldownDto {
        pareto: report
            .pareto
            .into_iter()
            .map(|entry| ParetoDto {
                name: entry.name,
                count: entry.count,
                cum_percent: entry.cum_percent,
            })
            .collect(),
        boxplot: BoxplotDto {
            categories: report.boxplot.categories,
            data: report.boxplot.data,
        },
        control: ControlChartDto {
            series: report.control.series,
            mean: report.control.mean,
            ucl: report.control.ucl,
            lcl: report.control.lcl,
        },
        heatmap: report.heatmap,
        group_compare: GroupCompareDto {
            levels: report.group_compare.levels,
            counts: report.group_compare.counts,
            avg_duration: report.group_compare.avg_duration,
        },
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

#[cfg(test)]
mod tests {
    use super::month_bounds;

    #[test]
    fn month_bounds_cover_whole_month() {
        let filter = month_bounds("2024-02").expect("filter");
        let from = filter.date_from.expect("from");
        let to = filter.date_to.expect("to");
        assert_eq!(from.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-02-01 00:00:00");
        // 2024 为闰年
        assert_eq!(to.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-02-29 23:59:59");
    }

    #[test]
    fn december_rolls_into_next_year() {
        let filter = month_bounds("2023-12").expect("filter");
        let to = filter.date_to.expect("to");
        assert_eq!(to.format("%Y-%m-%d").to_string(), "2023-12-31");
    }

    #[test]
    fn bad_month_format_is_rejected() {
        assert!(month_bounds("2024/02").is_none());
        assert!(month_bounds("2024-13").is_none());
        assert!(month_bounds("02-2024").is_none());
    }
}
