use netbi_analytics::{Confidence, ForecastModel, TrendDirection, forecast_counts};

#[test]
fn output_length_always_matches_periods() {
    for periods in [1usize, 7, 30] {
        let history = vec![2.0, 1.0, 3.0, 2.0, 1.0];
        let forecast = forecast_counts(&history, periods, Confidence::P95);
        assert_eq!(forecast.points.len(), periods);
    }
}

#[test]
fn predictions_never_go_negative() {
    // 明显下降的小计数序列：直线外推会落到负值，必须被收敛到 0
    let history: Vec<f64> = (0..10).map(|i| (9 - i) as f64 * 0.5).collect();
    let forecast = forecast_counts(&history, 14, Confidence::P95);
    assert!(forecast.points.iter().all(|p| p.predicted >= 0.0));
    assert!(forecast.points.iter().all(|p| p.lower >= 0.0));
    assert!(forecast.points.iter().all(|p| p.upper >= p.predicted));
}

#[test]
fn short_history_uses_linear_model() {
    let history = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let forecast = forecast_counts(&history, 3, Confidence::P95);
    assert_eq!(forecast.model, ForecastModel::Linear);
    assert!(!forecast.fallback);
    // 直线延伸：6、7、8
    assert!((forecast.points[0].predicted - 6.0).abs() < 1e-9);
    assert!((forecast.points[2].predicted - 8.0).abs() < 1e-9);
    assert_eq!(forecast.trend, TrendDirection::Increasing);
}

#[test]
fn volatile_history_uses_smoothing() {
    let history: Vec<f64> = (0..40)
        .map(|i| if i % 2 == 0 { 1.0 } else { 12.0 })
        .collect();
    let forecast = forecast_counts(&history, 5, Confidence::P95);
    assert_eq!(forecast.model, ForecastModel::ExponentialSmoothing);
    // 平滑外推是平线：预测序列自身是稳定的
    assert_eq!(forecast.trend, TrendDirection::Stable);
    assert!(forecast.stable);
}

#[test]
fn trending_history_uses_damped_trend() {
    let history: Vec<f64> = (0..40).map(|i| 100.0 + 0.5 * i as f64).collect();
    let forecast = forecast_counts(&history, 5, Confidence::P95);
    assert_eq!(forecast.model, ForecastModel::DampedTrend);
    assert!(!forecast.fallback);
}

#[test]
fn empty_history_falls_back_to_flat_mean() {
    let forecast = forecast_counts(&[], 4, Confidence::P95);
    assert!(forecast.fallback);
    assert_eq!(forecast.model, ForecastModel::MeanFallback);
    assert_eq!(forecast.points.len(), 4);
    assert!(forecast.points.iter().all(|p| p.predicted == 0.0));
}

#[test]
fn non_finite_history_falls_back() {
    let forecast = forecast_counts(&[3.0, f64::NAN, 5.0], 2, Confidence::P90);
    assert!(forecast.fallback);
    // 兜底基线为有限值的均值，区间 ±20%
    let point = &forecast.points[0];
    assert!((point.predicted - 4.0).abs() < 1e-9);
    assert!((point.lower - 3.2).abs() < 1e-9);
    assert!((point.upper - 4.8).abs() < 1e-9);
}

#[test]
fn confidence_widens_bands() {
    let history = vec![4.0, 6.0, 5.0, 7.0, 4.0, 6.0, 5.0];
    let narrow = forecast_counts(&history, 1, Confidence::P90);
    let wide = forecast_counts(&history, 1, Confidence::P95);
    let narrow_width = narrow.points[0].upper - narrow.points[0].lower;
    let wide_width = wide.points[0].upper - wide.points[0].lower;
    assert!(wide_width > narrow_width);
}

#[test]
fn confidence_parse_accepts_known_levels() {
    assert_eq!(Confidence::parse(None), Some(Confidence::P95));
    assert_eq!(Confidence::parse(Some(0.90)), Some(Confidence::P90));
    assert_eq!(Confidence::parse(Some(0.95)), Some(Confidence::P95));
    assert_eq!(Confidence::parse(Some(0.80)), None);
}
