//! 基于 Z 分数的异常标记
//!
//! 只做描述性标注，不改写任何数据。常数序列的 Z 分数全为 0，
//! 任何阈值下都不会被标记。

use crate::aggregate::TimeBucket;
use crate::stats::z_scores;

/// 默认判定阈值（|z| 超过即标记）。
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

/// 有效检测所需的最少桶数。
pub const MIN_ANOMALY_POINTS: usize = 7;

/// 阈值允许区间 [1.0, 5.0]，越界收敛到边界。
pub fn clamp_threshold(threshold: f64) -> f64 {
    if !threshold.is_finite() {
        return DEFAULT_Z_THRESHOLD;
    }
    threshold.clamp(1.0, 5.0)
}

/// 被标记的指标类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyMetric {
    Count,
    Duration,
}

impl AnomalyMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Duration => "duration",
        }
    }
}

/// 单个异常标记。
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyFlag {
    pub bucket_key: String,
    pub metric: AnomalyMetric,
    pub value: f64,
    pub z_score: f64,
}

/// 检测结果。
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyReport {
    pub threshold: f64,
    /// 参与检测的桶数。
    pub points: usize,
    pub flags: Vec<AnomalyFlag>,
    /// 任一标记命中，或全体 |z| 均值超阈值。
    pub is_anomaly: bool,
}

/// 检测结果外层：数据不足时返回哨兵而非错误。
#[derive(Debug, Clone, PartialEq)]
pub enum AnomalyOutcome {
    InsufficientData { points: usize, required: usize },
    Report(AnomalyReport),
}

/// 对聚合序列做计数与平均时长两路 Z 分数检测。
///
/// - 桶数少于 MIN_ANOMALY_POINTS 时返回 InsufficientData；
/// - 计数序列覆盖全部桶；平均时长序列只覆盖有时长数据的桶，
///   且该子序列至少要有 MIN_ANOMALY_POINTS 个点才参与检测；
/// - `is_anomaly` = 有标记命中 或 全部已算 |z| 的均值超过阈值。
pub fn detect_anomalies(buckets: &[TimeBucket], threshold: f64) -> AnomalyOutcome {
    let threshold = clamp_threshold(threshold);
    if buckets.len() < MIN_ANOMALY_POINTS {
        return AnomalyOutcome::InsufficientData {
            points: buckets.len(),
            required: MIN_ANOMALY_POINTS,
        };
    }

    let mut flags = Vec::new();
    let mut magnitudes = Vec::new();

    let counts: Vec<f64> = buckets.iter().map(|bucket| bucket.count as f64).collect();
    for (bucket, z) in buckets.iter().zip(z_scores(&counts)) {
        magnitudes.push(z.abs());
        if z.abs() > threshold {
            flags.push(AnomalyFlag {
                bucket_key: bucket.bucket_key.clone(),
                metric: AnomalyMetric::Count,
                value: bucket.count as f64,
                z_score: z,
            });
        }
    }

    let with_duration: Vec<(&TimeBucket, f64)> = buckets
        .iter()
        .filter_map(|bucket| bucket.avg_duration.map(|avg| (bucket, avg)))
        .collect();
    if with_duration.len() >= MIN_ANOMALY_POINTS {
        let durations: Vec<f64> = with_duration.iter().map(|(_, avg)| *avg).collect();
        for ((bucket, avg), z) in with_duration.iter().zip(z_scores(&durations)) {
            magnitudes.push(z.abs());
            if z.abs() > threshold {
                flags.push(AnomalyFlag {
                    bucket_key: bucket.bucket_key.clone(),
                    metric: AnomalyMetric::Duration,
                    value: *avg,
                    z_score: z,
                });
            }
        }
    }

    let mean_magnitude = if magnitudes.is_empty() {
        0.0
    } else {
        magnitudes.iter().sum::<f64>() / magnitudes.len() as f64
    };
    let is_anomaly = !flags.is_empty() || mean_magnitude > threshold;
    AnomalyOutcome::Report(AnomalyReport {
        threshold,
        points: buckets.len(),
        flags,
        is_anomaly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(key: &str, count: u64) -> TimeBucket {
        TimeBucket {
            bucket_key: key.to_string(),
            count,
            duration_sum: 0.0,
            avg_duration: None,
        }
    }

    #[test]
    fn threshold_clamps_to_range() {
        assert_eq!(clamp_threshold(0.2), 1.0);
        assert_eq!(clamp_threshold(9.0), 5.0);
        assert_eq!(clamp_threshold(f64::NAN), DEFAULT_Z_THRESHOLD);
    }

    #[test]
    fn six_points_is_insufficient() {
        let buckets: Vec<TimeBucket> = (0..6).map(|i| bucket(&format!("d{i}"), 5)).collect();
        assert_eq!(
            detect_anomalies(&buckets, 2.0),
            AnomalyOutcome::InsufficientData {
                points: 6,
                required: MIN_ANOMALY_POINTS
            }
        );
    }
}
