use crate::{Dimension, is_affirmative_flag};
use chrono::NaiveDateTime;

/// 故障记录的分析视图。
///
/// 分析引擎只消费这组字段；数据访问层负责把存储行裁剪为样本，
/// 分析函数本身不访问存储。
#[derive(Debug, Clone)]
pub struct FaultSample {
    /// 故障日期：所有趋势/聚合查询的规范分桶时间戳。
    pub occurred_at: NaiveDateTime,
    /// 处理时长（小时），记录不完整时缺失。
    pub duration_hours: Option<f64>,
    pub fault_type: Option<String>,
    pub cause_category: Option<String>,
    pub notification_level: Option<String>,
    /// 「是否主动发现」原始标志值。
    pub proactive_flag: Option<String>,
    /// 是否记录了投诉情况。
    pub has_complaint: bool,
}

impl FaultSample {
    /// 取指定维度的原始类别值。
    pub fn dimension_value(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::FaultType => self.fault_type.as_deref(),
            Dimension::CauseCategory => self.cause_category.as_deref(),
            Dimension::NotificationLevel => self.notification_level.as_deref(),
        }
    }

    /// 主动发现标志：None 表示未填写，不计入率的分母。
    pub fn is_proactive(&self) -> Option<bool> {
        is_affirmative_flag(self.proactive_flag.as_deref())
    }
}
