//! 数据模型
//!
//! 定义故障记录存储相关的数据模型：
//! - 故障记录行：FaultRecord（id 由存储层分配）
//! - 写入输入：FaultDraft（创建与全量更新共用）
//! - 列表过滤：FaultFilter、DurationBand

use chrono::NaiveDateTime;
use domain::FaultSample;

/// 故障记录（fault_record 表的一行）。
#[derive(Debug, Clone)]
pub struct FaultRecord {
    pub id: i64,
    /// 外部序号标签，可重复。
    pub sequence_no: Option<i64>,
    /// 故障日期：趋势/聚合的规范分桶时间戳。
    pub fault_date: Option<NaiveDateTime>,
    pub fault_name: Option<String>,
    pub province_cause_analysis: Option<String>,
    pub province_cause_category: Option<String>,
    pub province_fault_type: Option<String>,
    pub notification_level: Option<String>,
    pub cause_category: Option<String>,
    /// 处理时长（小时），写入时校验 >= 0。
    pub fault_duration_hours: Option<f64>,
    pub complaint_situation: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub fault_cause: Option<String>,
    pub fault_handling: Option<String>,
    /// 是否主动发现（是/否 样式的标志字段）。
    pub is_proactive_discovery: Option<String>,
    pub remarks: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FaultRecord {
    /// 裁剪为分析样本；故障日期缺失的记录不参与分析。
    pub fn to_sample(&self) -> Option<FaultSample> {
        let occurred_at = self.fault_date?;
        Some(FaultSample {
            occurred_at,
            duration_hours: self.fault_duration_hours,
            fault_type: self.province_fault_type.clone(),
            cause_category: self.cause_category.clone(),
            notification_level: self.notification_level.clone(),
            proactive_flag: self.is_proactive_discovery.clone(),
            has_complaint: self
                .complaint_situation
                .as_deref()
                .map(|text| !text.trim().is_empty())
                .unwrap_or(false),
        })
    }
}

/// 故障记录写入输入（创建与全量更新共用）。
///
/// 更新语义为全字段覆盖：字段为 None 即写入 NULL。
#[derive(Debug, Clone, Default)]
pub struct FaultDraft {
    pub sequence_no: Option<i64>,
    pub fault_date: Option<NaiveDateTime>,
    pub fault_name: Option<String>,
    pub province_cause_analysis: Option<String>,
    pub province_cause_category: Option<String>,
    pub province_fault_type: Option<String>,
    pub notification_level: Option<String>,
    pub cause_category: Option<String>,
    pub fault_duration_hours: Option<f64>,
    pub complaint_situation: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub fault_cause: Option<String>,
    pub fault_handling: Option<String>,
    pub is_proactive_discovery: Option<String>,
    pub remarks: Option<String>,
}

/// 处理时长区间（左闭右开；24+ 无上界）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBand {
    UpTo2,
    From2To6,
    From6To12,
    From12To24,
    Over24,
}

impl DurationBand {
    /// 解析区间参数：0-2 | 2-6 | 6-12 | 12-24 | 24+
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "0-2" => Some(Self::UpTo2),
            "2-6" => Some(Self::From2To6),
            "6-12" => Some(Self::From6To12),
            "12-24" => Some(Self::From12To24),
            "24+" => Some(Self::Over24),
            _ => None,
        }
    }

    /// 区间边界 [low, high)；Over24 无上界。
    pub fn bounds(&self) -> (f64, Option<f64>) {
        match self {
            Self::UpTo2 => (0.0, Some(2.0)),
            Self::From2To6 => (2.0, Some(6.0)),
            Self::From6To12 => (6.0, Some(12.0)),
            Self::From12To24 => (12.0, Some(24.0)),
            Self::Over24 => (24.0, None),
        }
    }

    pub fn contains(&self, duration: f64) -> bool {
        let (low, high) = self.bounds();
        duration >= low && high.map(|h| duration < h).unwrap_or(true)
    }
}

/// 故障列表/样本查询过滤条件。
///
/// 时长区间过滤只命中有时长数据的记录（与 SQL 列条件语义一致）。
#[derive(Debug, Clone, Default)]
pub struct FaultFilter {
    pub fault_type: Option<String>,
    pub cause_category: Option<String>,
    pub notification_level: Option<String>,
    pub duration_band: Option<DurationBand>,
    /// 起始故障日期（含）。
    pub date_from: Option<NaiveDateTime>,
    /// 截止故障日期（含）。
    pub date_to: Option<NaiveDateTime>,
}

impl FaultFilter {
    pub fn matches(&self, record: &FaultRecord) -> bool {
        let check = |expect: &Option<String>, actual: &Option<String>| match expect {
            Some(value) => actual.as_deref() == Some(value.as_str()),
            None => true,
        };
        if !check(&self.fault_type, &record.province_fault_type)
            || !check(&self.cause_category, &record.cause_category)
            || !check(&self.notification_level, &record.notification_level)
        {
            return false;
        }
        if let Some(band) = self.duration_band {
            match record.fault_duration_hours {
                Some(duration) if band.contains(duration) => {}
                _ => return false,
            }
        }
        if let Some(from) = self.date_from {
            match record.fault_date {
                Some(date) if date >= from => {}
                _ => return false,
            }
        }
        if let Some(to) = self.date_to {
            match record.fault_date {
                Some(date) if date <= to => {}
                _ => return false,
            }
        }
        true
    }
}
