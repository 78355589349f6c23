//! 故障指标分析引擎
//!
//! 纯同步计算：输入为数据访问层已物化的样本切片，输出为可直接
//! 序列化的结构化结果。模块划分：
//! - `stats`：描述统计（百分位、均值/标准差、Z 分数、最小二乘斜率）
//! - `aggregate`：时间分桶聚合与类别维度汇总
//! - `anomaly`：基于 Z 分数的异常标记
//! - `pattern`：趋势/动量/季节性/周期启发式
//! - `forecast`：预测模型选择与外推
//! - `report`：月度下钻报表装配（帕累托/箱线/控制图/热力图）
//!
//! 失败语义：数据不足与数值退化一律返回显式的哨兵结果或安全
//! 默认值，绝不向调用方抛错（报表端点据此渲染友好的空态）。

pub mod aggregate;
pub mod anomaly;
pub mod forecast;
pub mod pattern;
pub mod report;
pub mod stats;

pub use aggregate::{
    CategoryBucket, DimensionFilter, DurationRangeCount, GroupBucket, ProactivePoint, TimeBucket,
    aggregate_by_time, complaint_count, duration_distribution, mean_duration,
    proactive_distribution, proactive_rate, proactive_trend, rollup_by_dimension,
    rollup_with_duration,
};
pub use anomaly::{
    AnomalyFlag, AnomalyMetric, AnomalyOutcome, AnomalyReport, DEFAULT_Z_THRESHOLD,
    MIN_ANOMALY_POINTS, clamp_threshold, detect_anomalies,
};
pub use forecast::{Confidence, Forecast, ForecastModel, ForecastPoint, forecast_counts};
pub use pattern::{
    CycleSummary, MomentumSummary, PatternReport, SeasonalitySummary, TrendDirection,
    TrendSummary, analyze_patterns, classify_trend,
};
pub use report::{BoxPlotGroup, ControlChart, DrilldownReport, GroupCompare, ParetoEntry, drilldown};
pub use stats::{
    autocorrelation, coefficient_of_variation, five_number_summary, least_squares_slope, mean,
    mean_stddev, percentile, round2, z_scores,
};
