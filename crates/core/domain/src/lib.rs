pub mod sample;

pub use sample::FaultSample;

use chrono::{Datelike, NaiveDateTime, Timelike};

/// 空/缺失类别值统一归入的桶标签。
pub const UNKNOWN_LABEL: &str = "未知";

/// 类别标签归一化：去除首尾空白，空串与缺失归入「未知」桶。
///
/// 所有聚合入口共用此函数，保证各报表的桶标签一致。
pub fn normalize_label(value: Option<&str>) -> String {
    match value {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                UNKNOWN_LABEL.to_string()
            } else {
                trimmed.to_string()
            }
        }
        None => UNKNOWN_LABEL.to_string(),
    }
}

/// 解析「是否主动发现」一类的标志字段。
///
/// 肯定集合：是 / yes / true / 1（忽略大小写与首尾空白）。
/// 缺失或空串返回 None（不计入主动发现率的分母）。
pub fn is_affirmative_flag(value: Option<&str>) -> Option<bool> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    Some(matches!(lowered.as_str(), "是" | "yes" | "true" | "1"))
}

/// 时间分桶粒度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// 解析粒度参数（hourly|daily|weekly|monthly）。
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// 计算时间戳所属桶的键。
    ///
    /// 键格式按粒度分别为 `YYYY-MM-DD HH` / `YYYY-MM-DD` /
    /// `YYYY-Www`（ISO 周）/ `YYYY-MM`，字典序即时间序。
    pub fn bucket_key(&self, ts: NaiveDateTime) -> String {
        match self {
            Self::Hourly => format!(
                "{:04}-{:02}-{:02} {:02}",
                ts.year(),
                ts.month(),
                ts.day(),
                ts.hour()
            ),
            Self::Daily => format!("{:04}-{:02}-{:02}", ts.year(), ts.month(), ts.day()),
            Self::Weekly => {
                let week = ts.iso_week();
                format!("{:04}-W{:02}", week.year(), week.week())
            }
            Self::Monthly => format!("{:04}-{:02}", ts.year(), ts.month()),
        }
    }
}

/// 可分组的类别维度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// 省-故障类型
    FaultType,
    /// 原因分类
    CauseCategory,
    /// 通报级别
    NotificationLevel,
}

impl Dimension {
    /// 解析维度参数（fault_type|cause_category|notification_level）。
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fault_type" => Some(Self::FaultType),
            "cause_category" => Some(Self::CauseCategory),
            "notification_level" => Some(Self::NotificationLevel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FaultType => "fault_type",
            Self::CauseCategory => "cause_category",
            Self::NotificationLevel => "notification_level",
        }
    }
}
