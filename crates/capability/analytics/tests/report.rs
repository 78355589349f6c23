use chrono::{NaiveDate, NaiveDateTime};
use domain::{FaultSample, UNKNOWN_LABEL};
use netbi_analytics::drilldown;

fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("date")
        .and_hms_opt(h, 0, 0)
        .expect("time")
}

fn sample(
    when: NaiveDateTime,
    duration: Option<f64>,
    cause: Option<&str>,
    level: Option<&str>,
) -> FaultSample {
    FaultSample {
        occurred_at: when,
        duration_hours: duration,
        fault_type: None,
        cause_category: cause.map(str::to_string),
        notification_level: level.map(str::to_string),
        proactive_flag: None,
        has_complaint: false,
    }
}

#[test]
fn pareto_accumulates_to_hundred_percent() {
    let samples = vec![
        sample(ts(2024, 5, 1, 8), Some(1.0), Some("硬件"), None),
        sample(ts(2024, 5, 2, 9), Some(2.0), Some("硬件"), None),
        sample(ts(2024, 5, 3, 10), Some(3.0), Some("光缆"), None),
        sample(ts(2024, 5, 4, 11), Some(4.0), None, None),
    ];
    let report = drilldown(&samples);
    assert_eq!(report.pareto.len(), 3);
    assert_eq!(report.pareto[0].name, "硬件");
    assert_eq!(report.pareto[0].count, 2);
    assert_eq!(report.pareto[0].cum_percent, 50.0);
    assert_eq!(report.pareto[2].cum_percent, 100.0);
    // 缺失原因的记录进入「未知」桶而非被丢弃
    assert!(report.pareto.iter().any(|entry| entry.name == UNKNOWN_LABEL));
}

#[test]
fn control_chart_clamps_lcl_at_zero() {
    // 小均值大波动：mean - 3σ 为负，LCL 必须收敛到 0
    let samples = vec![
        sample(ts(2024, 5, 1, 0), Some(0.5), None, None),
        sample(ts(2024, 5, 2, 0), Some(8.0), None, None),
        sample(ts(2024, 5, 3, 0), Some(0.5), None, None),
    ];
    let report = drilldown(&samples);
    assert_eq!(report.control.lcl, 0.0);
    assert!(report.control.ucl > report.control.mean);
    assert_eq!(report.control.series, vec![0.5, 8.0, 0.5]);
}

#[test]
fn control_chart_series_is_chronological() {
    let samples = vec![
        sample(ts(2024, 5, 3, 0), Some(3.0), None, None),
        sample(ts(2024, 5, 1, 0), Some(1.0), None, None),
        sample(ts(2024, 5, 2, 0), Some(2.0), None, None),
    ];
    let report = drilldown(&samples);
    assert_eq!(report.control.series, vec![1.0, 2.0, 3.0]);
}

#[test]
fn heatmap_covers_full_week_grid() {
    // 2024-05-06 是周一
    let samples = vec![sample(ts(2024, 5, 6, 14), None, None, None)];
    let report = drilldown(&samples);
    assert_eq!(report.heatmap.len(), 7 * 24);
    let hit = report
        .heatmap
        .iter()
        .find(|cell| cell[0] == 14 && cell[1] == 0)
        .expect("cell");
    assert_eq!(hit[2], 1);
    let zero_cells = report.heatmap.iter().filter(|cell| cell[2] == 0).count();
    assert_eq!(zero_cells, 7 * 24 - 1);
}

#[test]
fn boxplot_skips_categories_without_durations() {
    let samples = vec![
        sample(ts(2024, 5, 1, 0), Some(2.0), Some("硬件"), None),
        sample(ts(2024, 5, 2, 0), Some(4.0), Some("硬件"), None),
        sample(ts(2024, 5, 3, 0), None, Some("割接"), None),
    ];
    let report = drilldown(&samples);
    assert_eq!(report.boxplot.categories, vec!["硬件".to_string()]);
    assert_eq!(report.boxplot.data[0], [2.0, 2.5, 3.0, 3.5, 4.0]);
}

#[test]
fn group_compare_orders_levels_ascending() {
    let samples = vec![
        sample(ts(2024, 5, 1, 0), Some(4.0), None, Some("二级")),
        sample(ts(2024, 5, 2, 0), Some(2.0), None, Some("一级")),
        sample(ts(2024, 5, 3, 0), Some(6.0), None, Some("二级")),
        sample(ts(2024, 5, 4, 0), None, None, None),
    ];
    let report = drilldown(&samples);
    let compare = &report.group_compare;
    assert_eq!(compare.levels.len(), 3);
    // BTreeMap 键升序；未填写级别归入「未知」
    assert!(compare.levels.contains(&UNKNOWN_LABEL.to_string()));
    let second_slot = compare
        .levels
        .iter()
        .position(|level| level == "二级")
        .expect("二级");
    assert_eq!(compare.counts[second_slot], 2);
    assert_eq!(compare.avg_duration[second_slot], 5.0);
}
