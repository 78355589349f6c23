//! 预测模型选择与外推
//!
//! 每次调用按决策树选择模型（非持久状态机）：
//! 1. 历史长度 < 30 → 线性外推；
//! 2. 变异系数 > 0.5 → 指数平滑外推；
//! 3. |趋势斜率| > 0.1 → 阻尼趋势（Holt 线性）外推；
//! 4. 其余 → 线性外推。
//!
//! 任何数值退化（空历史、非有限值、计算产出非有限值）都降级为
//! 「历史均值平线 ±20%」的兜底预测并打上 fallback 标记，
//! 预测接口永不向调用方抛错。

use crate::pattern::{TrendDirection, classify_trend};
use crate::stats::{coefficient_of_variation, least_squares_slope, mean, mean_stddev};

/// 长度门限：历史短于 30 期直接用线性模型。
pub const SHORT_HISTORY_LEN: usize = 30;

/// 变异系数门限：波动大时改用指数平滑。
pub const HIGH_VOLATILITY_CV: f64 = 0.5;

/// 斜率门限：趋势明显时改用阻尼趋势模型。
pub const STRONG_TREND_SLOPE: f64 = 0.1;

/// 预测序列稳定性标签的变异系数门限。
pub const STABILITY_CV_THRESHOLD: f64 = 0.3;

/// 兜底预测的区间半宽（±20%）。
pub const FALLBACK_BAND_RATIO: f64 = 0.2;

/// 指数平滑系数。
const SMOOTHING_ALPHA: f64 = 0.3;

/// 阻尼趋势模型参数。
const HOLT_ALPHA: f64 = 0.5;
const HOLT_BETA: f64 = 0.3;
const HOLT_PHI: f64 = 0.9;

/// 置信水平与对应正态分位数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    P90,
    P95,
}

impl Confidence {
    /// 解析置信水平参数（0.90 / 0.95），缺省 95%。
    pub fn parse(value: Option<f64>) -> Option<Self> {
        match value {
            None => Some(Self::P95),
            Some(v) if (v - 0.90).abs() < 1e-9 => Some(Self::P90),
            Some(v) if (v - 0.95).abs() < 1e-9 => Some(Self::P95),
            Some(_) => None,
        }
    }

    pub fn z(&self) -> f64 {
        match self {
            Self::P90 => 1.645,
            Self::P95 => 1.96,
        }
    }

    pub fn level(&self) -> f64 {
        match self {
            Self::P90 => 0.90,
            Self::P95 => 0.95,
        }
    }
}

/// 被选中的预测模型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastModel {
    Linear,
    ExponentialSmoothing,
    DampedTrend,
    MeanFallback,
}

impl ForecastModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::ExponentialSmoothing => "exponential_smoothing",
            Self::DampedTrend => "damped_trend",
            Self::MeanFallback => "mean_fallback",
        }
    }
}

/// 单期预测值与对称置信区间。
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// 预测结果。
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub model: ForecastModel,
    pub confidence: Confidence,
    pub points: Vec<ForecastPoint>,
    /// 由预测序列自身斜率得到的趋势方向。
    pub trend: TrendDirection,
    /// 预测序列变异系数不超过门限时为 true。
    pub stable: bool,
    /// 是否走了兜底路径。
    pub fallback: bool,
}

/// 对周期计数序列向前外推 `periods` 期。
///
/// 输出长度恒等于 `periods`，预测值与下界均收敛到 >= 0。
pub fn forecast_counts(history: &[f64], periods: usize, confidence: Confidence) -> Forecast {
    if history.is_empty() || history.iter().any(|value| !value.is_finite()) {
        return fallback_forecast(history, periods, confidence);
    }

    let model = select_model(history);
    let predicted = match model {
        ForecastModel::Linear => linear_extrapolation(history, periods),
        ForecastModel::ExponentialSmoothing => smoothing_extrapolation(history, periods),
        ForecastModel::DampedTrend => damped_trend_extrapolation(history, periods),
        // select_model 不会返回该分支
        ForecastModel::MeanFallback => return fallback_forecast(history, periods, confidence),
    };
    if predicted.iter().any(|value| !value.is_finite()) {
        return fallback_forecast(history, periods, confidence);
    }

    let (_, sigma) = mean_stddev(history);
    let band = confidence.z() * sigma;
    let points = predicted
        .iter()
        .map(|value| {
            let predicted = value.max(0.0);
            ForecastPoint {
                predicted,
                lower: (predicted - band).max(0.0),
                upper: predicted + band,
            }
        })
        .collect::<Vec<_>>();

    let (trend, stable) = describe_series(&points);
    Forecast {
        model,
        confidence,
        points,
        trend,
        stable,
        fallback: false,
    }
}

/// 决策树模型选择（对已验证为有限的非空历史）。
fn select_model(history: &[f64]) -> ForecastModel {
    if history.len() < SHORT_HISTORY_LEN {
        return ForecastModel::Linear;
    }
    if coefficient_of_variation(history) > HIGH_VOLATILITY_CV {
        return ForecastModel::ExponentialSmoothing;
    }
    if least_squares_slope(history).abs() > STRONG_TREND_SLOPE {
        return ForecastModel::DampedTrend;
    }
    ForecastModel::Linear
}

/// 最小二乘直线外推。
fn linear_extrapolation(history: &[f64], periods: usize) -> Vec<f64> {
    let slope = least_squares_slope(history);
    let x_mean = (history.len() - 1) as f64 / 2.0;
    let intercept = mean(history) - slope * x_mean;
    let last_x = (history.len() - 1) as f64;
    (1..=periods)
        .map(|step| intercept + slope * (last_x + step as f64))
        .collect()
}

/// 简单指数平滑：最终平滑水平的平线外推。
fn smoothing_extrapolation(history: &[f64], periods: usize) -> Vec<f64> {
    let mut level = history[0];
    for value in &history[1..] {
        level = SMOOTHING_ALPHA * value + (1.0 - SMOOTHING_ALPHA) * level;
    }
    vec![level; periods]
}

/// 阻尼趋势（Holt 线性）外推。
///
/// 第 h 期预测为 level + (phi + phi^2 + … + phi^h) * trend，
/// 阻尼系数防止长期外推发散。
fn damped_trend_extrapolation(history: &[f64], periods: usize) -> Vec<f64> {
    let mut level = history[0];
    let mut trend = if history.len() > 1 {
        history[1] - history[0]
    } else {
        0.0
    };
    for value in &history[1..] {
        let previous_level = level;
        level = HOLT_ALPHA * value + (1.0 - HOLT_ALPHA) * (level + HOLT_PHI * trend);
        trend = HOLT_BETA * (level - previous_level) + (1.0 - HOLT_BETA) * HOLT_PHI * trend;
    }
    let mut damping = 0.0;
    let mut damp_power = 1.0;
    (1..=periods)
        .map(|_| {
            damp_power *= HOLT_PHI;
            damping += damp_power;
            level + damping * trend
        })
        .collect()
}

/// 兜底：历史均值平线 ±20%。
fn fallback_forecast(history: &[f64], periods: usize, confidence: Confidence) -> Forecast {
    let finite: Vec<f64> = history.iter().cloned().filter(|v| v.is_finite()).collect();
    let baseline = mean(&finite).max(0.0);
    let band = baseline * FALLBACK_BAND_RATIO;
    let points = vec![
        ForecastPoint {
            predicted: baseline,
            lower: (baseline - band).max(0.0),
            upper: baseline + band,
        };
        periods
    ];
    Forecast {
        model: ForecastModel::MeanFallback,
        confidence,
        points,
        trend: TrendDirection::Stable,
        stable: true,
        fallback: true,
    }
}

/// 由预测序列自身的斜率与变异系数推定性标签。
fn describe_series(points: &[ForecastPoint]) -> (TrendDirection, bool) {
    let values: Vec<f64> = points.iter().map(|point| point.predicted).collect();
    let trend = classify_trend(&values)
        .map(|summary| summary.direction)
        .unwrap_or(TrendDirection::Stable);
    let stable = coefficient_of_variation(&values) <= STABILITY_CV_THRESHOLD;
    (trend, stable)
}
