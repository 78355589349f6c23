use netbi_analytics::{
    AnomalyMetric, AnomalyOutcome, TimeBucket, detect_anomalies,
};

fn count_bucket(key: &str, count: u64) -> TimeBucket {
    TimeBucket {
        bucket_key: key.to_string(),
        count,
        duration_sum: 0.0,
        avg_duration: None,
    }
}

fn day_series(counts: &[u64]) -> Vec<TimeBucket> {
    counts
        .iter()
        .enumerate()
        .map(|(i, count)| count_bucket(&format!("2024-01-{:02}", i + 1), *count))
        .collect()
}

#[test]
fn constant_series_is_never_anomalous() {
    let buckets = day_series(&[5; 10]);
    for threshold in [1.0, 2.0, 5.0] {
        match detect_anomalies(&buckets, threshold) {
            AnomalyOutcome::Report(report) => {
                assert!(report.flags.is_empty());
                assert!(!report.is_anomaly);
            }
            other => panic!("expected report, got {other:?}"),
        }
    }
}

#[test]
fn single_outlier_is_the_only_flag() {
    // 均值约 11.4，50 的 z 分数约 2.27
    let buckets = day_series(&[5, 5, 5, 5, 5, 5, 50]);
    let AnomalyOutcome::Report(report) = detect_anomalies(&buckets, 2.0) else {
        panic!("expected report");
    };
    assert_eq!(report.flags.len(), 1);
    let flag = &report.flags[0];
    assert_eq!(flag.bucket_key, "2024-01-07");
    assert_eq!(flag.metric, AnomalyMetric::Count);
    assert_eq!(flag.value, 50.0);
    assert!(flag.z_score > 2.0);
    assert!(report.is_anomaly);
}

#[test]
fn short_series_reports_insufficient_data() {
    let buckets = day_series(&[1, 2, 3]);
    assert_eq!(
        detect_anomalies(&buckets, 2.0),
        AnomalyOutcome::InsufficientData {
            points: 3,
            required: 7
        }
    );
}

#[test]
fn duration_series_is_checked_when_present() {
    let mut buckets = day_series(&[4; 8]);
    for (i, bucket) in buckets.iter_mut().enumerate() {
        // 7 个正常时长 + 1 个极端时长
        let avg = if i == 3 { 60.0 } else { 2.0 };
        bucket.avg_duration = Some(avg);
        bucket.duration_sum = avg * bucket.count as f64;
    }
    let AnomalyOutcome::Report(report) = detect_anomalies(&buckets, 2.0) else {
        panic!("expected report");
    };
    assert!(
        report
            .flags
            .iter()
            .any(|flag| flag.metric == AnomalyMetric::Duration && flag.bucket_key == "2024-01-04")
    );
    // 计数恒定：不产生计数标记
    assert!(report.flags.iter().all(|f| f.metric != AnomalyMetric::Count));
}

#[test]
fn out_of_range_threshold_is_clamped() {
    let buckets = day_series(&[5, 5, 5, 5, 5, 5, 50]);
    // 阈值 0.1 收敛到 1.0：50 与其余点的 z 都可能命中
    let AnomalyOutcome::Report(report) = detect_anomalies(&buckets, 0.1) else {
        panic!("expected report");
    };
    assert_eq!(report.threshold, 1.0);
    assert!(!report.flags.is_empty());
}
