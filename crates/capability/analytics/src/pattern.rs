//! 趋势与季节性启发式
//!
//! 阈值常量均为可调参数，而非物理常数。序列长度不足各自的
//! 下限时返回 None / 未检出，绝不报错。

use crate::aggregate::{DimensionFilter, aggregate_by_time};
use crate::stats::{autocorrelation, least_squares_slope, mean_stddev};
use chrono::Datelike;
use domain::{FaultSample, Granularity};
use std::collections::BTreeMap;

/// 斜率死区：|slope| 不超过该值判为稳定。
pub const SLOPE_DEAD_ZONE: f64 = 0.01;

/// 星期维度变异系数阈值。
pub const WEEKDAY_VARIATION_THRESHOLD: f64 = 0.2;

/// 月份维度变异系数阈值。
pub const MONTHLY_VARIATION_THRESHOLD: f64 = 0.3;

/// 动量与周期扫描共用的相关系数阈值。
pub const CORRELATION_THRESHOLD: f64 = 0.5;

/// 趋势分类所需最少点数。
pub const MIN_TREND_POINTS: usize = 3;

/// 滞后 1 自相关所需最少点数。
pub const MIN_MOMENTUM_POINTS: usize = 4;

/// 周期扫描所需最少点数。
pub const MIN_CYCLE_POINTS: usize = 8;

/// 星期季节性所需最少的日桶数（两个完整周）。
pub const MIN_WEEKDAY_POINTS: usize = 14;

/// 月份季节性所需最少的不同月份数。
pub const MIN_MONTHLY_GROUPS: usize = 3;

/// 趋势方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

/// 趋势分类结果。
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    pub slope: f64,
}

/// 最小二乘斜率 + 死区分类；少于 3 个点返回 None。
pub fn classify_trend(values: &[f64]) -> Option<TrendSummary> {
    if values.len() < MIN_TREND_POINTS {
        return None;
    }
    let slope = least_squares_slope(values);
    let direction = if slope.abs() <= SLOPE_DEAD_ZONE {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };
    Some(TrendSummary { direction, slope })
}

/// 动量（滞后 1 自相关）结果。
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumSummary {
    pub lag1_autocorrelation: f64,
    pub has_momentum: bool,
}

/// 滞后 1 自相关；少于 4 个点返回 None。
pub fn detect_momentum(values: &[f64]) -> Option<MomentumSummary> {
    if values.len() < MIN_MOMENTUM_POINTS {
        return None;
    }
    let r1 = autocorrelation(values, 1);
    Some(MomentumSummary {
        lag1_autocorrelation: r1,
        has_momentum: r1.abs() > CORRELATION_THRESHOLD,
    })
}

/// 季节性检测结果。
///
/// 变异系数 = 各星期（或各月份）日均计数序列的 stddev / mean。
/// 对应维度数据不足时变异系数为 None、检出为 false。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeasonalitySummary {
    pub weekday_variation: Option<f64>,
    pub weekday_detected: bool,
    pub monthly_variation: Option<f64>,
    pub monthly_detected: bool,
}

/// 朴素周期扫描结果。
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSummary {
    pub period: usize,
    pub correlation: f64,
}

/// 在滞后 2..=n/2 范围内扫描自相关，取最大者。
///
/// 少于 8 个点或最大相关不超过阈值时返回 None。
pub fn scan_cycle(values: &[f64]) -> Option<CycleSummary> {
    if values.len() < MIN_CYCLE_POINTS {
        return None;
    }
    let mut best: Option<CycleSummary> = None;
    for lag in 2..=values.len() / 2 {
        let correlation = autocorrelation(values, lag);
        let better = match &best {
            Some(current) => correlation > current.correlation,
            None => true,
        };
        if better {
            best = Some(CycleSummary {
                period: lag,
                correlation,
            });
        }
    }
    best.filter(|cycle| cycle.correlation > CORRELATION_THRESHOLD)
}

/// 模式识别汇总。
#[derive(Debug, Clone, PartialEq)]
pub struct PatternReport {
    /// 参与分析的日桶数。
    pub points: usize,
    pub trend: Option<TrendSummary>,
    pub momentum: Option<MomentumSummary>,
    pub seasonality: SeasonalitySummary,
    pub cycle: Option<CycleSummary>,
}

/// 对样本集做日粒度计数序列上的全量模式识别。
pub fn analyze_patterns(samples: &[FaultSample]) -> PatternReport {
    let daily = aggregate_by_time(samples, Granularity::Daily, &DimensionFilter::default());
    let counts: Vec<f64> = daily.iter().map(|bucket| bucket.count as f64).collect();

    PatternReport {
        points: counts.len(),
        trend: classify_trend(&counts),
        momentum: detect_momentum(&counts),
        seasonality: detect_seasonality(samples),
        cycle: scan_cycle(&counts),
    }
}

/// 星期/月份两个维度的季节性变异系数。
pub fn detect_seasonality(samples: &[FaultSample]) -> SeasonalitySummary {
    // 先落到日桶，再按星期、按月份分组取日均计数
    let mut day_counts: BTreeMap<chrono::NaiveDate, u64> = BTreeMap::new();
    for sample in samples {
        *day_counts.entry(sample.occurred_at.date()).or_insert(0) += 1;
    }

    let mut summary = SeasonalitySummary::default();

    if day_counts.len() >= MIN_WEEKDAY_POINTS {
        let mut weekday_sums = [0.0f64; 7];
        let mut weekday_days = [0u64; 7];
        for (date, count) in &day_counts {
            let slot = date.weekday().num_days_from_monday() as usize;
            weekday_sums[slot] += *count as f64;
            weekday_days[slot] += 1;
        }
        let means: Vec<f64> = weekday_sums
            .iter()
            .zip(weekday_days.iter())
            .filter(|(_, days)| **days > 0)
            .map(|(sum, days)| sum / *days as f64)
            .collect();
        let variation = variation_coefficient(&means);
        summary.weekday_detected = variation.map(|v| v > WEEKDAY_VARIATION_THRESHOLD) == Some(true);
        summary.weekday_variation = variation;
    }

    let mut month_sums: BTreeMap<u32, (f64, u64)> = BTreeMap::new();
    for (date, count) in &day_counts {
        let entry = month_sums.entry(date.month()).or_insert((0.0, 0));
        entry.0 += *count as f64;
        entry.1 += 1;
    }
    if month_sums.len() >= MIN_MONTHLY_GROUPS {
        let means: Vec<f64> = month_sums
            .values()
            .map(|(sum, days)| sum / *days as f64)
            .collect();
        let variation = variation_coefficient(&means);
        summary.monthly_detected = variation.map(|v| v > MONTHLY_VARIATION_THRESHOLD) == Some(true);
        summary.monthly_variation = variation;
    }

    summary
}

fn variation_coefficient(means: &[f64]) -> Option<f64> {
    if means.len() < 2 {
        return None;
    }
    let (mu, sigma) = mean_stddev(means);
    if mu == 0.0 {
        return None;
    }
    Some((sigma / mu).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_needs_three_points() {
        assert!(classify_trend(&[1.0, 2.0]).is_none());
    }

    #[test]
    fn rising_series_classified_increasing() {
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let trend = classify_trend(&values).expect("trend");
        assert_eq!(trend.direction, TrendDirection::Increasing);
    }

    #[test]
    fn cycle_scan_finds_alternation() {
        let values: Vec<f64> = (0..16).map(|i| if i % 2 == 0 { 2.0 } else { 8.0 }).collect();
        let cycle = scan_cycle(&values).expect("cycle");
        assert_eq!(cycle.period, 2);
        assert!(cycle.correlation > CORRELATION_THRESHOLD);
    }
}
