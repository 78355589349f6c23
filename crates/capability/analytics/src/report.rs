//! 月度下钻报表装配
//!
//! 把一个月（或任意筛选后的样本集）装配成多维度的图表就绪数据：
//! 帕累托、按原因分类的箱线图、处理时长控制图、周×时热力图、
//! 通报级别对比。数值在此处做两位小数舍入（展示边界）。

use crate::aggregate::rollup_by_dimension;
use crate::stats::{five_number_summary, mean_stddev, round2};
use chrono::{Datelike, Timelike};
use domain::{Dimension, FaultSample, normalize_label};
use std::collections::BTreeMap;

/// 帕累托条目：计数降序 + 累计占比。
#[derive(Debug, Clone, PartialEq)]
pub struct ParetoEntry {
    pub name: String,
    pub count: u64,
    /// 累计占比（百分比，两位小数）。
    pub cum_percent: f64,
}

/// 原因分类帕累托。
pub fn pareto(samples: &[FaultSample], dimension: Dimension) -> Vec<ParetoEntry> {
    let buckets = rollup_by_dimension(samples, dimension);
    let total: u64 = buckets.iter().map(|bucket| bucket.count).sum();
    let total = total.max(1);
    let mut cumulative = 0u64;
    buckets
        .into_iter()
        .map(|bucket| {
            cumulative += bucket.count;
            ParetoEntry {
                name: bucket.name,
                count: bucket.count,
                cum_percent: round2(cumulative as f64 * 100.0 / total as f64),
            }
        })
        .collect()
}

/// 按类别的处理时长箱线图（五数概括，两位小数）。
///
/// 没有任何时长数据的类别直接跳过。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxPlotGroup {
    pub categories: Vec<String>,
    pub data: Vec<[f64; 5]>,
}

pub fn duration_boxplot(samples: &[FaultSample], dimension: Dimension) -> BoxPlotGroup {
    let mut grouped: Vec<(String, Vec<f64>)> = Vec::new();
    for sample in samples {
        let Some(duration) = sample.duration_hours else {
            continue;
        };
        let name = normalize_label(sample.dimension_value(dimension));
        match grouped.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, durations)) => durations.push(duration),
            None => grouped.push((name, vec![duration])),
        }
    }
    let mut plot = BoxPlotGroup::default();
    for (name, durations) in grouped {
        if let Some(summary) = five_number_summary(&durations) {
            plot.categories.push(name);
            plot.data.push(summary.map(round2));
        }
    }
    plot
}

/// 处理时长控制图：时间序列、均值与 3σ 控制限。
#[derive(Debug, Clone, PartialEq)]
pub struct ControlChart {
    /// 按发生时间排序的时长序列（两位小数）。
    pub series: Vec<f64>,
    pub mean: f64,
    /// 上控制限 mean + 3σ。
    pub ucl: f64,
    /// 下控制限 mean - 3σ，收敛到 >= 0。
    pub lcl: f64,
}

pub fn control_chart(samples: &[FaultSample]) -> ControlChart {
    let mut timed: Vec<(chrono::NaiveDateTime, f64)> = samples
        .iter()
        .filter_map(|sample| sample.duration_hours.map(|d| (sample.occurred_at, d)))
        .collect();
    timed.sort_by_key(|(ts, _)| *ts);
    let durations: Vec<f64> = timed.into_iter().map(|(_, d)| d).collect();
    let (mu, sigma) = mean_stddev(&durations);
    ControlChart {
        series: durations.iter().map(|d| round2(*d)).collect(),
        mean: round2(mu),
        ucl: round2(mu + 3.0 * sigma),
        lcl: round2((mu - 3.0 * sigma).max(0.0)),
    }
}

/// 周(周一=0) × 小时(0-23) 的发生次数热力图。
///
/// 输出 168 个 [hour, weekday, count] 单元，含零值单元
/// （热力图坐标轴需要完整网格）。
pub fn weekday_hour_heatmap(samples: &[FaultSample]) -> Vec<[i64; 3]> {
    let mut counts = [[0i64; 24]; 7];
    for sample in samples {
        let weekday = sample.occurred_at.weekday().num_days_from_monday() as usize;
        let hour = sample.occurred_at.hour() as usize;
        counts[weekday][hour] += 1;
    }
    let mut cells = Vec::with_capacity(7 * 24);
    for (weekday, row) in counts.iter().enumerate() {
        for (hour, count) in row.iter().enumerate() {
            cells.push([hour as i64, weekday as i64, *count]);
        }
    }
    cells
}

/// 通报级别对比聚合（键升序，与图例顺序一致）。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupCompare {
    pub levels: Vec<String>,
    pub counts: Vec<u64>,
    /// 每级平均时长（两位小数），无时长数据时为 0。
    pub avg_duration: Vec<f64>,
}

pub fn group_compare(samples: &[FaultSample]) -> GroupCompare {
    let mut grouped: BTreeMap<String, (u64, f64, u64)> = BTreeMap::new();
    for sample in samples {
        let level = normalize_label(sample.notification_level.as_deref());
        let entry = grouped.entry(level).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Some(duration) = sample.duration_hours {
            entry.1 += duration;
            entry.2 += 1;
        }
    }
    let mut compare = GroupCompare::default();
    for (level, (count, duration_sum, duration_count)) in grouped {
        compare.levels.push(level);
        compare.counts.push(count);
        compare.avg_duration.push(if duration_count == 0 {
            0.0
        } else {
            round2(duration_sum / duration_count as f64)
        });
    }
    compare
}

/// 月度下钻报表。
#[derive(Debug, Clone, PartialEq)]
pub struct DrilldownReport {
    pub pareto: Vec<ParetoEntry>,
    pub boxplot: BoxPlotGroup,
    pub control: ControlChart,
    pub heatmap: Vec<[i64; 3]>,
    pub group_compare: GroupCompare,
}

/// 对（已按月份筛选的）样本集装配完整下钻报表。
pub fn drilldown(samples: &[FaultSample]) -> DrilldownReport {
    DrilldownReport {
        pareto: pareto(samples, Dimension::CauseCategory),
        boxplot: duration_boxplot(samples, Dimension::CauseCategory),
        control: control_chart(samples),
        heatmap: weekday_hour_heatmap(samples),
        group_compare: group_compare(samples),
    }
}
