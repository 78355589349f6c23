//! 时间分桶聚合与类别维度汇总
//!
//! 输入为数据访问层物化好的样本切片；过滤（日期范围、类别等值）
//! 原则上由数据层完成，这里仅支持聚合内的类别等值过滤。

use crate::stats::round2;
use domain::{Dimension, FaultSample, Granularity, normalize_label};
use std::collections::{BTreeMap, HashMap};

/// 单个时间桶的聚合结果。
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBucket {
    /// 桶键（字典序即时间序，见 Granularity::bucket_key）。
    pub bucket_key: String,
    pub count: u64,
    pub duration_sum: f64,
    /// 桶内所有样本时长均缺失时为 None（区别于 0.0）。
    pub avg_duration: Option<f64>,
}

/// 聚合内的类别等值过滤（各字段为 None 时不过滤）。
#[derive(Debug, Clone, Default)]
pub struct DimensionFilter {
    pub fault_type: Option<String>,
    pub cause_category: Option<String>,
    pub notification_level: Option<String>,
}

impl DimensionFilter {
    pub fn matches(&self, sample: &FaultSample) -> bool {
        let check = |expect: &Option<String>, actual: Option<&str>| match expect {
            Some(value) => actual.map(str::trim) == Some(value.as_str()),
            None => true,
        };
        check(&self.fault_type, sample.fault_type.as_deref())
            && check(&self.cause_category, sample.cause_category.as_deref())
            && check(&self.notification_level, sample.notification_level.as_deref())
    }
}

/// 按时间粒度分桶聚合：每桶计数、时长和、平均时长。
///
/// 结果按桶键升序；没有样本落入的桶直接省略（不补零）。
/// 桶键自描述，需要连续时间轴的展示层可自行补零。
/// 空输入返回空序列。
pub fn aggregate_by_time(
    samples: &[FaultSample],
    granularity: Granularity,
    filter: &DimensionFilter,
) -> Vec<TimeBucket> {
    let mut buckets: BTreeMap<String, (u64, f64, u64)> = BTreeMap::new();
    for sample in samples {
        if !filter.matches(sample) {
            continue;
        }
        let key = granularity.bucket_key(sample.occurred_at);
        let entry = buckets.entry(key).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Some(duration) = sample.duration_hours {
            entry.1 += duration;
            entry.2 += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(bucket_key, (count, duration_sum, duration_count))| TimeBucket {
            bucket_key,
            count,
            duration_sum,
            avg_duration: if duration_count == 0 {
                None
            } else {
                Some(duration_sum / duration_count as f64)
            },
        })
        .collect()
}

/// 单维度计数桶。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBucket {
    pub name: String,
    pub count: u64,
}

/// 按单个类别维度汇总计数。
///
/// 空/缺失类别归一化为「未知」桶，绝不丢弃记录。结果按计数降序，
/// 计数相同时保持首次出现顺序（稳定排序）。
pub fn rollup_by_dimension(samples: &[FaultSample], dimension: Dimension) -> Vec<CategoryBucket> {
    let mut order: Vec<CategoryBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for sample in samples {
        let name = normalize_label(sample.dimension_value(dimension));
        match index.get(&name) {
            Some(&slot) => order[slot].count += 1,
            None => {
                index.insert(name.clone(), order.len());
                order.push(CategoryBucket { name, count: 1 });
            }
        }
    }
    // sort_by 为稳定排序：并列计数保持首次出现顺序
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

/// 带时长统计的分组桶（下钻分组接口用）。
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBucket {
    pub key: String,
    pub count: u64,
    pub duration_sum: f64,
    /// 平均修复时长（MTTR），组内无时长数据时为 None。
    pub mttr: Option<f64>,
}

/// 按维度分组并统计计数/时长和/MTTR，计数降序（稳定）。
pub fn rollup_with_duration(samples: &[FaultSample], dimension: Dimension) -> Vec<GroupBucket> {
    let mut order: Vec<(String, u64, f64, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for sample in samples {
        let key = normalize_label(sample.dimension_value(dimension));
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, 0, 0.0, 0));
                order.len() - 1
            }
        };
        order[slot].1 += 1;
        if let Some(duration) = sample.duration_hours {
            order[slot].2 += duration;
            order[slot].3 += 1;
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .map(|(key, count, duration_sum, duration_count)| GroupBucket {
            key,
            count,
            duration_sum,
            mttr: if duration_count == 0 {
                None
            } else {
                Some(duration_sum / duration_count as f64)
            },
        })
        .collect()
}

/// 固定时长区间的分布计数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationRangeCount {
    pub range: &'static str,
    pub count: u64,
}

/// 处理时长分布：左闭右开区间 0-2 / 2-6 / 6-12 / 12-24 小时，
/// 24 小时以上无上界；时长缺失的记录计入「未知」桶。
pub fn duration_distribution(samples: &[FaultSample]) -> Vec<DurationRangeCount> {
    const RANGES: [(&str, f64, f64); 4] = [
        ("0-2小时", 0.0, 2.0),
        ("2-6小时", 2.0, 6.0),
        ("6-12小时", 6.0, 12.0),
        ("12-24小时", 12.0, 24.0),
    ];
    let mut counts = [0u64; 6];
    for sample in samples {
        match sample.duration_hours {
            None => counts[5] += 1,
            Some(duration) if duration >= 24.0 => counts[4] += 1,
            Some(duration) => {
                for (slot, (_, low, high)) in RANGES.iter().enumerate() {
                    if duration >= *low && duration < *high {
                        counts[slot] += 1;
                        break;
                    }
                }
            }
        }
    }
    let mut result: Vec<DurationRangeCount> = RANGES
        .iter()
        .enumerate()
        .map(|(slot, (label, _, _))| DurationRangeCount {
            range: label,
            count: counts[slot],
        })
        .collect();
    result.push(DurationRangeCount {
        range: "24小时以上",
        count: counts[4],
    });
    result.push(DurationRangeCount {
        range: "未知",
        count: counts[5],
    });
    result
}

/// 记录了投诉情况的故障数。
pub fn complaint_count(samples: &[FaultSample]) -> u64 {
    samples.iter().filter(|sample| sample.has_complaint).count() as u64
}

/// 平均修复时长（MTTR，小时）；无有效时长返回 None。
pub fn mean_duration(samples: &[FaultSample]) -> Option<f64> {
    let durations: Vec<f64> = samples.iter().filter_map(|s| s.duration_hours).collect();
    if durations.is_empty() {
        return None;
    }
    Some(durations.iter().sum::<f64>() / durations.len() as f64)
}

/// 主动发现率（百分比）。
///
/// 分母为填写了标志字段的记录数；无此类记录返回 None。
pub fn proactive_rate(samples: &[FaultSample]) -> Option<f64> {
    let mut flagged = 0u64;
    let mut proactive = 0u64;
    for sample in samples {
        if let Some(is_proactive) = sample.is_proactive() {
            flagged += 1;
            if is_proactive {
                proactive += 1;
            }
        }
    }
    if flagged == 0 {
        return None;
    }
    Some(proactive as f64 * 100.0 / flagged as f64)
}

/// 标志值原样分布（未填写归入「未知」）。
pub fn proactive_distribution(samples: &[FaultSample]) -> Vec<CategoryBucket> {
    let mut order: Vec<CategoryBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for sample in samples {
        let name = normalize_label(sample.proactive_flag.as_deref());
        match index.get(&name) {
            Some(&slot) => order[slot].count += 1,
            None => {
                index.insert(name.clone(), order.len());
                order.push(CategoryBucket { name, count: 1 });
            }
        }
    }
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

/// 月度主动发现率趋势点。
#[derive(Debug, Clone, PartialEq)]
pub struct ProactivePoint {
    pub date: String,
    pub proactive_count: u64,
    pub total_count: u64,
    /// 百分比，两位小数（展示边界）。
    pub rate: f64,
}

/// 按月统计主动发现率；只计入填写了标志字段的记录。
pub fn proactive_trend(samples: &[FaultSample]) -> Vec<ProactivePoint> {
    let mut months: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for sample in samples {
        let Some(is_proactive) = sample.is_proactive() else {
            continue;
        };
        let key = Granularity::Monthly.bucket_key(sample.occurred_at);
        let entry = months.entry(key).or_insert((0, 0));
        entry.1 += 1;
        if is_proactive {
            entry.0 += 1;
        }
    }
    months
        .into_iter()
        .map(|(date, (proactive_count, total_count))| ProactivePoint {
            date,
            proactive_count,
            total_count,
            rate: if total_count == 0 {
                0.0
            } else {
                round2(proactive_count as f64 * 100.0 / total_count as f64)
            },
        })
        .collect()
}
