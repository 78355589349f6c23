//! 输入验证辅助函数
//!
//! 提供统一的输入验证与解析函数：
//! - normalize_required / normalize_optional：字符串字段规整
//! - parse_flexible_datetime：多格式日期时间解析
//! - draft_from_request：请求体转存储写入输入（含格式校验）
//! - filter_from_params：列表/分析查询的过滤条件装配

use crate::utils::response::bad_request_error;
use api_contract::SaveFaultRequest;
use axum::response::Response;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use netbi_storage::{DurationBand, FaultDraft, FaultFilter};

/// 验证必填字段，去除空格并检查非空
pub fn normalize_required(value: String, field: &str) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}

/// 验证可选字段，如果提供则去除空格；空白视同未提供
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 多格式日期时间解析。
///
/// 依次尝试 `YYYY-MM-DDTHH:MM`、`YYYY-MM-DD HH:MM:SS`、`YYYY-MM-DD`
/// （表单 datetime-local、展示格式与纯日期三种来源）。
pub fn parse_flexible_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return Some(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn parse_datetime_field(
    value: Option<String>,
    field: &str,
) -> Result<Option<NaiveDateTime>, String> {
    match normalize_optional(value) {
        Some(raw) => match parse_flexible_datetime(&raw) {
            Some(parsed) => Ok(Some(parsed)),
            None => Err(format!("{field} has invalid datetime format: {raw}")),
        },
        None => Ok(None),
    }
}

/// 请求体转存储写入输入。
///
/// 日期格式错误返回具体字段的错误消息（批量导入逐行收集）。
pub fn draft_from_request(req: SaveFaultRequest) -> Result<FaultDraft, String> {
    Ok(FaultDraft {
        sequence_no: req.sequence_no,
        fault_date: parse_datetime_field(req.fault_date, "faultDate")?,
        fault_name: normalize_optional(req.fault_name),
        province_cause_analysis: normalize_optional(req.province_cause_analysis),
        province_cause_category: normalize_optional(req.province_cause_category),
        province_fault_type: normalize_optional(req.province_fault_type),
        notification_level: normalize_optional(req.notification_level),
        cause_category: normalize_optional(req.cause_category),
        fault_duration_hours: req.fault_duration_hours,
        complaint_situation: normalize_optional(req.complaint_situation),
        start_time: parse_datetime_field(req.start_time, "startTime")?,
        end_time: parse_datetime_field(req.end_time, "endTime")?,
        fault_cause: normalize_optional(req.fault_cause),
        fault_handling: normalize_optional(req.fault_handling),
        is_proactive_discovery: normalize_optional(req.is_proactive_discovery),
        remarks: normalize_optional(req.remarks),
    })
}

/// 列表/分析查询的过滤条件装配。
///
/// 明确的起止日期优先；都未给出时 time_range（最近 N 天）生效。
/// 结束日期含当天（补到 23:59:59）。
pub fn filter_from_params(
    fault_type: Option<String>,
    cause_category: Option<String>,
    notification_level: Option<String>,
    duration_range: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    time_range: Option<String>,
) -> Result<FaultFilter, Response> {
    let duration_band = match normalize_optional(duration_range) {
        Some(raw) => match DurationBand::parse(&raw) {
            Some(band) => Some(band),
            None => {
                return Err(bad_request_error(
                    "durationRange must be 0-2|2-6|6-12|12-24|24+",
                ));
            }
        },
        None => None,
    };

    let date_from = match normalize_optional(start_date) {
        Some(raw) => match parse_flexible_datetime(&raw) {
            Some(parsed) => Some(parsed),
            None => return Err(bad_request_error("startDate must be YYYY-MM-DD")),
        },
        None => None,
    };
    let mut date_to = match normalize_optional(end_date) {
        Some(raw) => match parse_flexible_datetime(&raw) {
            Some(parsed) => Some(parsed),
            None => return Err(bad_request_error("endDate must be YYYY-MM-DD")),
        },
        None => None,
    };
    // 纯日期的截止时间补到当天末尾，保证「含当天」语义
    if let Some(to) = date_to {
        if to.time() == chrono::NaiveTime::MIN {
            date_to = to.date().and_hms_opt(23, 59, 59);
        }
    }

    let mut date_from = date_from;
    if date_from.is_none() && date_to.is_none() {
        if let Some(raw) = normalize_optional(time_range) {
            let days: i64 = raw
                .parse()
                .map_err(|_| bad_request_error("timeRange must be a day count"))?;
            if days <= 0 {
                return Err(bad_request_error("timeRange must be a day count"));
            }
            date_from = Some(Utc::now().naive_utc() - Duration::days(days));
        }
    }

    if let (Some(from), Some(to)) = (date_from, date_to) {
        if from > to {
            return Err(bad_request_error("startDate must be <= endDate"));
        }
    }

    Ok(FaultFilter {
        fault_type: normalize_optional(fault_type),
        cause_category: normalize_optional(cause_category),
        notification_level: normalize_optional(notification_level),
        duration_band,
        date_from,
        date_to,
    })
}
