//! 写入校验辅助函数
//!
//! 所有写入路径（创建/更新/批量导入）共用：
//! - 处理时长非负
//! - 结束时间不早于发生时间

use crate::error::StorageError;
use crate::models::FaultDraft;

/// 校验写入输入；违反约束返回 Invalid 类错误（映射为 400）。
pub fn validate_draft(draft: &FaultDraft) -> Result<(), StorageError> {
    if let Some(duration) = draft.fault_duration_hours {
        if !duration.is_finite() || duration < 0.0 {
            return Err(StorageError::invalid(
                "faultDurationHours must be >= 0",
            ));
        }
    }
    if let (Some(start), Some(end)) = (draft.start_time, draft.end_time) {
        if end < start {
            return Err(StorageError::invalid("endTime must be >= startTime"));
        }
    }
    Ok(())
}
