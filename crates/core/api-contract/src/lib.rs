//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

// ============================================================================
// 故障记录 CRUD
// ============================================================================

/// 故障记录返回结构。
///
/// 日期时间统一格式化为 `YYYY-MM-DD HH:MM:SS` 字符串。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultDto {
    pub id: i64,
    pub sequence_no: Option<i64>,
    pub fault_date: Option<String>,
    pub fault_name: Option<String>,
    pub province_cause_analysis: Option<String>,
    pub province_cause_category: Option<String>,
    pub province_fault_type: Option<String>,
    pub notification_level: Option<String>,
    pub cause_category: Option<String>,
    pub fault_duration_hours: Option<f64>,
    pub complaint_situation: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub fault_cause: Option<String>,
    pub fault_handling: Option<String>,
    pub is_proactive_discovery: Option<String>,
    pub remarks: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 故障记录创建/全量更新请求体。
///
/// 更新是全字段覆盖：缺失字段写入 NULL，而不是保留旧值。
/// 日期字段接受 `YYYY-MM-DDTHH:MM`、`YYYY-MM-DD HH:MM:SS`、
/// `YYYY-MM-DD` 三种格式。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFaultRequest {
    pub sequence_no: Option<i64>,
    pub fault_date: Option<String>,
    pub fault_name: Option<String>,
    pub province_cause_analysis: Option<String>,
    pub province_cause_category: Option<String>,
    pub province_fault_type: Option<String>,
    pub notification_level: Option<String>,
    pub cause_category: Option<String>,
    pub fault_duration_hours: Option<f64>,
    pub complaint_situation: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub fault_cause: Option<String>,
    pub fault_handling: Option<String>,
    pub is_proactive_discovery: Option<String>,
    pub remarks: Option<String>,
}

/// 故障列表查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub fault_type: Option<String>,
    pub cause_category: Option<String>,
    pub notification_level: Option<String>,
    /// 处理时长区间：0-2 | 2-6 | 6-12 | 12-24 | 24+
    pub duration_range: Option<String>,
    /// 开始日期（YYYY-MM-DD）。
    pub start_date: Option<String>,
    /// 结束日期（YYYY-MM-DD，含当天）。
    pub end_date: Option<String>,
    /// 最近 N 天快捷筛选；与明确起止日期同时给出时以后者为准。
    pub time_range: Option<String>,
}

/// 分页列表返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultPageDto {
    pub faults: Vec<FaultDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// 批量删除请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteRequest {
    pub ids: Vec<i64>,
}

/// 批量删除返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteDto {
    pub deleted: u64,
}

/// 批量导入请求体（与 SaveFaultRequest 同行结构）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFaultsRequest {
    pub records: Vec<SaveFaultRequest>,
}

/// 批量导入结果：逐行容错，错误只截取前 10 条。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResultDto {
    pub total_rows: u64,
    pub success_count: u64,
    pub error_count: u64,
    pub errors: Vec<String>,
}

/// 关键字搜索查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub keyword: String,
}

/// 筛选下拉选项（各维度去重值）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsDto {
    pub fault_types: Vec<String>,
    pub cause_categories: Vec<String>,
    pub notification_levels: Vec<String>,
}

// ============================================================================
// 概览与趋势分析
// ============================================================================

/// 概览 KPI。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    pub total_faults: u64,
    pub monthly_faults: u64,
    /// 平均处理时长（小时，两位小数）；无数据时为 0。
    pub avg_duration: f64,
    /// 主动发现率（百分比，两位小数）；无数据时为 0。
    pub proactive_rate: f64,
    /// 记录了投诉情况的故障数。
    pub complaint_count: u64,
}

/// 趋势查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendQuery {
    /// hourly|daily|weekly|monthly，缺省 monthly。
    pub granularity: Option<String>,
    pub fault_type: Option<String>,
    pub cause_category: Option<String>,
    pub notification_level: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// 时间桶返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucketDto {
    /// 桶键（如 2024-03 / 2024-03-05 / 2024-W10）。
    pub date: String,
    pub count: u64,
    pub duration_sum: f64,
    pub avg_duration: Option<f64>,
}

/// 单类别计数（饼图数据点）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCountDto {
    pub name: String,
    pub value: u64,
}

/// 分类分析返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalysisDto {
    pub cause_category: Vec<CategoryCountDto>,
    pub fault_type: Vec<CategoryCountDto>,
    pub notification_level: Vec<CategoryCountDto>,
}

/// 时长区间计数。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationRangeDto {
    pub range: String,
    pub count: u64,
}

/// 月度平均时长趋势点。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationTrendPointDto {
    pub date: String,
    pub avg_duration: f64,
}

/// 处理时长分析返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationAnalysisDto {
    pub duration_distribution: Vec<DurationRangeDto>,
    pub duration_trend: Vec<DurationTrendPointDto>,
}

/// 月度主动发现率趋势点。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProactiveTrendPointDto {
    pub date: String,
    pub proactive_rate: f64,
    pub proactive_count: u64,
    pub total_count: u64,
}

/// 主动发现分析返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProactiveAnalysisDto {
    pub proactive_distribution: Vec<CategoryCountDto>,
    pub proactive_trend: Vec<ProactiveTrendPointDto>,
}

// ============================================================================
// 下钻
// ============================================================================

/// 分组下钻查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillGroupQuery {
    /// notification_level | cause_category
    pub group_by: String,
    pub notification_level: Option<String>,
    pub cause_category: Option<String>,
}

/// 分组下钻桶。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBucketDto {
    pub key: String,
    pub count: u64,
    pub duration_sum: f64,
    /// 平均修复时长（两位小数）；无时长数据时为 0。
    pub mttr: f64,
}

/// 月度下钻查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrilldownQuery {
    /// 格式 YYYY-MM。
    pub month: String,
}

/// 帕累托条目。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoDto {
    pub name: String,
    pub count: u64,
    pub cum_percent: f64,
}

/// 箱线图数据。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxplotDto {
    pub categories: Vec<String>,
    pub data: Vec<[f64; 5]>,
}

/// 控制图数据。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlChartDto {
    pub series: Vec<f64>,
    pub mean: f64,
    pub ucl: f64,
    pub lcl: f64,
}

/// 通报级别对比。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCompareDto {
    pub levels: Vec<String>,
    pub counts: Vec<u64>,
    pub avg_duration: Vec<f64>,
}

/// 月度下钻返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrilldownDto {
    pub pareto: Vec<ParetoDto>,
    pub boxplot: BoxplotDto,
    pub control: ControlChartDto,
    /// [hour, weekday, count] 单元，周一为 0。
    pub heatmap: Vec<[i64; 3]>,
    pub group_compare: GroupCompareDto,
}

// ============================================================================
// 洞察（异常/模式/预测）
// ============================================================================

/// 异常检测查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyQuery {
    /// hourly|daily|weekly|monthly，缺省 daily。
    pub granularity: Option<String>,
    /// |z| 判定阈值，允许 1.0-5.0，缺省 2.0。
    pub threshold: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// 单个异常标记。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyFlagDto {
    pub bucket_key: String,
    /// count | duration
    pub metric: String,
    pub value: f64,
    pub z_score: f64,
}

/// 异常检测返回结构。
///
/// `status` 为 `insufficient_data` 时 flags 为空、isAnomaly 为 false，
/// required 给出所需最少桶数。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyDto {
    /// ok | insufficient_data
    pub status: String,
    pub threshold: f64,
    pub points: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<u64>,
    pub flags: Vec<AnomalyFlagDto>,
    pub is_anomaly: bool,
}

/// 模式识别查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// 趋势摘要。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummaryDto {
    /// increasing | decreasing | stable
    pub direction: String,
    pub slope: f64,
}

/// 动量摘要。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentumDto {
    pub lag1_autocorrelation: f64,
    pub has_momentum: bool,
}

/// 季节性摘要。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalityDto {
    pub weekday_variation: Option<f64>,
    pub weekday_detected: bool,
    pub monthly_variation: Option<f64>,
    pub monthly_detected: bool,
}

/// 周期扫描摘要。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleDto {
    pub period: u64,
    pub correlation: f64,
}

/// 模式识别返回结构；数据不足的子项为 null。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDto {
    pub points: u64,
    pub trend: Option<TrendSummaryDto>,
    pub momentum: Option<MomentumDto>,
    pub seasonality: SeasonalityDto,
    pub cycle: Option<CycleDto>,
}

/// 预测查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastQuery {
    /// 预测期数，1-90，缺省 7。
    pub periods: Option<u64>,
    /// 置信水平，0.90 或 0.95，缺省 0.95。
    pub confidence: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// 单期预测点。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPointDto {
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// 预测返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDto {
    /// linear | exponential_smoothing | damped_trend | mean_fallback
    pub model: String,
    pub confidence: f64,
    pub fallback: bool,
    /// increasing | decreasing | stable（由预测序列自身推定）
    pub trend: String,
    pub stable: bool,
    pub points: Vec<ForecastPointDto>,
}

// ============================================================================
// 运行指标
// ============================================================================

/// 进程指标快照返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDto {
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
