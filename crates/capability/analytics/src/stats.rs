//! 描述统计基础函数
//!
//! 全部为 `&[f64]` 上的纯函数。空输入与零方差按安全默认值处理，
//! 不报错（见各函数说明）。

/// 线性插值百分位。
///
/// 算法：升序排序后取下标 `k = (n-1)*p`，在 floor(k) 与 ceil(k)
/// 之间线性插值。`p` 取值范围 [0, 1]，越界时收敛到边界。
///
/// 空输入返回 0.0（而非报错），调用方无需为空序列做分支。
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let p = p.clamp(0.0, 1.0);
    let k = (sorted.len() - 1) as f64 * p;
    let floor = k.floor() as usize;
    let ceil = (floor + 1).min(sorted.len() - 1);
    if floor == ceil {
        return sorted[floor];
    }
    sorted[floor] + (sorted[ceil] - sorted[floor]) * (k - floor as f64)
}

/// 五数概括：[min, p25, 中位数, p75, max]。
///
/// 空输入返回 None（数据不足哨兵）；数值保持全精度，
/// 两位小数的舍入只发生在展示边界。
pub fn five_number_summary(values: &[f64]) -> Option<[f64; 5]> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some([
        min,
        percentile(values, 0.25),
        percentile(values, 0.5),
        percentile(values, 0.75),
        max,
    ])
}

/// 算术均值，空输入返回 0.0。
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 均值与样本标准差（n-1 分母）。
///
/// n <= 1 时标准差为 0.0。
pub fn mean_stddev(values: &[f64]) -> (f64, f64) {
    let mu = mean(values);
    if values.len() <= 1 {
        return (mu, 0.0);
    }
    let variance = values
        .iter()
        .map(|value| (value - mu).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    (mu, variance.sqrt())
}

/// 逐元素 Z 分数：(x - mean) / stddev。
///
/// 标准差为 0（常数序列）时全部返回 0.0，常数序列永远不会被
/// 标记为异常。
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let (mu, sigma) = mean_stddev(values);
    if sigma == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|value| (value - mu) / sigma).collect()
}

/// 最小二乘拟合斜率，x 轴取 0..n。
///
/// n < 2 时返回 0.0。
pub fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let n_f = n as f64;
    let x_mean = (n_f - 1.0) / 2.0;
    let y_mean = mean(values);
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, value) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (value - y_mean);
        denominator += dx * dx;
    }
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// 滞后 k 自相关系数。
///
/// 序列长度不足（n <= lag + 1）或方差为 0 时返回 0.0。
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if lag == 0 || n <= lag + 1 {
        return 0.0;
    }
    let mu = mean(values);
    let denominator: f64 = values.iter().map(|value| (value - mu).powi(2)).sum();
    if denominator == 0.0 {
        return 0.0;
    }
    let numerator: f64 = values
        .windows(lag + 1)
        .map(|window| (window[0] - mu) * (window[lag] - mu))
        .sum();
    numerator / denominator
}

/// 变异系数 stddev / mean，均值为 0 时返回 0.0。
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let (mu, sigma) = mean_stddev(values);
    if mu == 0.0 {
        return 0.0;
    }
    (sigma / mu).abs()
}

/// 展示边界的两位小数舍入。
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
