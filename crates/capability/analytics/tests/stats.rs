use netbi_analytics::{five_number_summary, mean_stddev, percentile, round2, z_scores};

/// 参考实现：标准中位数。
fn reference_median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite"));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[test]
fn percentile_half_matches_median_odd_and_even() {
    let odd = vec![7.0, 1.0, 5.0, 3.0, 9.0];
    let even = vec![4.0, 8.0, 2.0, 6.0];
    assert!((percentile(&odd, 0.5) - reference_median(&odd)).abs() < 1e-12);
    assert!((percentile(&even, 0.5) - reference_median(&even)).abs() < 1e-12);
}

#[test]
fn percentile_of_empty_is_zero() {
    assert_eq!(percentile(&[], 0.5), 0.0);
}

#[test]
fn percentile_clamps_out_of_range_p() {
    let values = vec![1.0, 2.0, 3.0];
    assert_eq!(percentile(&values, -0.5), 1.0);
    assert_eq!(percentile(&values, 1.5), 3.0);
}

#[test]
fn five_number_summary_of_one_to_ten() {
    let values: Vec<f64> = (1..=10).map(|i| i as f64).collect();
    let summary = five_number_summary(&values).expect("summary");
    assert_eq!(summary, [1.0, 3.25, 5.5, 7.75, 10.0]);
}

#[test]
fn five_number_summary_of_empty_is_none() {
    assert!(five_number_summary(&[]).is_none());
}

#[test]
fn sample_stddev_uses_n_minus_one() {
    let (mu, sigma) = mean_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert!((mu - 5.0).abs() < 1e-12);
    // 样本方差 32/7
    assert!((sigma - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
}

#[test]
fn stddev_of_singleton_is_zero() {
    let (mu, sigma) = mean_stddev(&[3.5]);
    assert_eq!(mu, 3.5);
    assert_eq!(sigma, 0.0);
}

#[test]
fn z_scores_of_constant_series_are_zero() {
    let scores = z_scores(&[4.0; 12]);
    assert_eq!(scores, vec![0.0; 12]);
}

#[test]
fn z_scores_sum_to_zero() {
    let scores = z_scores(&[1.0, 2.0, 3.0, 4.0, 10.0]);
    let sum: f64 = scores.iter().sum();
    assert!(sum.abs() < 1e-9);
}

#[test]
fn round2_keeps_two_decimals() {
    assert_eq!(round2(3.14159), 3.14);
    assert_eq!(round2(2.718), 2.72);
    assert_eq!(round2(-1.239), -1.24);
}
