use chrono::{NaiveDate, NaiveDateTime};
use domain::{Dimension, FaultSample, Granularity, UNKNOWN_LABEL};
use netbi_analytics::{
    DimensionFilter, aggregate_by_time, complaint_count, duration_distribution, proactive_rate,
    proactive_trend, rollup_by_dimension, rollup_with_duration,
};

fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("date")
        .and_hms_opt(h, 0, 0)
        .expect("time")
}

fn sample(when: NaiveDateTime, duration: Option<f64>, cause: Option<&str>) -> FaultSample {
    FaultSample {
        occurred_at: when,
        duration_hours: duration,
        fault_type: None,
        cause_category: cause.map(str::to_string),
        notification_level: None,
        proactive_flag: None,
        has_complaint: false,
    }
}

#[test]
fn empty_input_yields_empty_buckets() {
    let buckets = aggregate_by_time(&[], Granularity::Daily, &DimensionFilter::default());
    assert!(buckets.is_empty());
}

#[test]
fn daily_buckets_skip_empty_days() {
    let samples = vec![
        sample(ts(2024, 1, 1, 9), Some(2.0), None),
        sample(ts(2024, 1, 1, 18), Some(4.0), None),
        // 1 月 2 日无记录：桶被省略而非补零
        sample(ts(2024, 1, 3, 6), None, None),
    ];
    let buckets = aggregate_by_time(&samples, Granularity::Daily, &DimensionFilter::default());
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].bucket_key, "2024-01-01");
    assert_eq!(buckets[0].count, 2);
    assert_eq!(buckets[0].duration_sum, 6.0);
    assert_eq!(buckets[0].avg_duration, Some(3.0));
    // 全部时长缺失的桶：平均时长为 None 而非 0
    assert_eq!(buckets[1].bucket_key, "2024-01-03");
    assert_eq!(buckets[1].avg_duration, None);
    assert_eq!(buckets[1].duration_sum, 0.0);
}

#[test]
fn aggregation_is_idempotent() {
    let samples: Vec<FaultSample> = (0..30)
        .map(|i| sample(ts(2024, 3, 1 + (i % 10), i % 24), Some(i as f64), None))
        .collect();
    let first = aggregate_by_time(&samples, Granularity::Weekly, &DimensionFilter::default());
    let second = aggregate_by_time(&samples, Granularity::Weekly, &DimensionFilter::default());
    assert_eq!(first, second);
}

#[test]
fn filter_restricts_to_matching_category() {
    let samples = vec![
        sample(ts(2024, 1, 1, 0), Some(1.0), Some("硬件")),
        sample(ts(2024, 1, 1, 1), Some(3.0), Some("光缆")),
    ];
    let filter = DimensionFilter {
        cause_category: Some("硬件".to_string()),
        ..DimensionFilter::default()
    };
    let buckets = aggregate_by_time(&samples, Granularity::Monthly, &filter);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].count, 1);
    assert_eq!(buckets[0].duration_sum, 1.0);
}

#[test]
fn rollup_coalesces_missing_to_unknown() {
    let samples = vec![
        sample(ts(2024, 1, 1, 0), None, None),
        sample(ts(2024, 1, 1, 1), None, Some("硬件")),
        sample(ts(2024, 1, 1, 2), None, Some("硬件")),
    ];
    let buckets = rollup_by_dimension(&samples, Dimension::CauseCategory);
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].name, "硬件");
    assert_eq!(buckets[0].count, 2);
    assert_eq!(buckets[1].name, UNKNOWN_LABEL);
    assert_eq!(buckets[1].count, 1);
}

#[test]
fn rollup_ties_keep_first_seen_order() {
    let samples = vec![
        sample(ts(2024, 1, 1, 0), None, Some("电源")),
        sample(ts(2024, 1, 1, 1), None, Some("光缆")),
        sample(ts(2024, 1, 1, 2), None, Some("电源")),
        sample(ts(2024, 1, 1, 3), None, Some("光缆")),
    ];
    let buckets = rollup_by_dimension(&samples, Dimension::CauseCategory);
    // 并列计数：按首次出现顺序（稳定排序）
    assert_eq!(buckets[0].name, "电源");
    assert_eq!(buckets[1].name, "光缆");
}

#[test]
fn group_rollup_reports_mttr() {
    let samples = vec![
        sample(ts(2024, 1, 1, 0), Some(2.0), Some("硬件")),
        sample(ts(2024, 1, 1, 1), Some(4.0), Some("硬件")),
        sample(ts(2024, 1, 1, 2), None, Some("割接")),
    ];
    let buckets = rollup_with_duration(&samples, Dimension::CauseCategory);
    assert_eq!(buckets[0].key, "硬件");
    assert_eq!(buckets[0].duration_sum, 6.0);
    assert_eq!(buckets[0].mttr, Some(3.0));
    assert_eq!(buckets[1].key, "割接");
    assert_eq!(buckets[1].mttr, None);
}

#[test]
fn duration_ranges_are_left_closed() {
    let samples = vec![
        sample(ts(2024, 1, 1, 0), Some(0.0), None),
        sample(ts(2024, 1, 1, 1), Some(2.0), None),
        sample(ts(2024, 1, 1, 2), Some(6.0), None),
        sample(ts(2024, 1, 1, 3), Some(12.0), None),
        sample(ts(2024, 1, 1, 4), Some(24.0), None),
        sample(ts(2024, 1, 1, 5), Some(30.5), None),
        sample(ts(2024, 1, 1, 6), None, None),
    ];
    let distribution = duration_distribution(&samples);
    let counts: Vec<(&str, u64)> = distribution
        .iter()
        .map(|entry| (entry.range, entry.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("0-2小时", 1),
            ("2-6小时", 1),
            ("6-12小时", 1),
            ("12-24小时", 1),
            ("24小时以上", 2),
            ("未知", 1),
        ]
    );
}

#[test]
fn proactive_rate_uses_flagged_denominator() {
    let mut samples = vec![
        sample(ts(2024, 1, 5, 0), None, None),
        sample(ts(2024, 1, 6, 0), None, None),
        sample(ts(2024, 1, 7, 0), None, None),
    ];
    samples[0].proactive_flag = Some("是".to_string());
    samples[1].proactive_flag = Some("否".to_string());
    // 第三条未填写：不计入分母
    let rate = proactive_rate(&samples).expect("rate");
    assert!((rate - 50.0).abs() < 1e-9);
}

#[test]
fn complaint_count_checks_flag() {
    let mut with_complaint = sample(ts(2024, 1, 1, 0), None, None);
    with_complaint.has_complaint = true;
    let without = sample(ts(2024, 1, 2, 0), None, None);
    assert_eq!(complaint_count(&[with_complaint, without]), 1);
}

#[test]
fn proactive_trend_groups_by_month() {
    let mut january = sample(ts(2024, 1, 10, 0), None, None);
    january.proactive_flag = Some("是".to_string());
    let mut february_yes = sample(ts(2024, 2, 2, 0), None, None);
    february_yes.proactive_flag = Some("yes".to_string());
    let mut february_no = sample(ts(2024, 2, 20, 0), None, None);
    february_no.proactive_flag = Some("否".to_string());

    let trend = proactive_trend(&[january, february_yes, february_no]);
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].date, "2024-01");
    assert_eq!(trend[0].rate, 100.0);
    assert_eq!(trend[1].date, "2024-02");
    assert_eq!(trend[1].proactive_count, 1);
    assert_eq!(trend[1].total_count, 2);
    assert_eq!(trend[1].rate, 50.0);
}
