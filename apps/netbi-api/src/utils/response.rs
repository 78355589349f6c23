//! HTTP 响应辅助函数和 DTO 转换
//!
//! 提供统一的错误响应构造函数和 DTO 转换函数：
//! - 错误响应：bad_request_error, not_found_error, storage_error
//! - DTO 转换：fault_to_dto
//!
//! 设计原则：
//! - 所有错误返回统一的 ApiResponse 格式
//! - 存储层的校验错误映射为 400，其余为 500
//! - 日期时间统一格式化为 YYYY-MM-DD HH:MM:SS

use api_contract::{ApiResponse, FaultDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDateTime;
use netbi_storage::{FaultRecord, StorageError};

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 存储错误响应：写入校验错误走 400，其余 500
pub fn storage_error(err: StorageError) -> Response {
    let message = err.to_string();
    if err.is_invalid() {
        return bad_request_error(message);
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

/// 日期时间展示格式
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// FaultRecord 转 FaultDto
pub fn fault_to_dto(record: FaultRecord) -> FaultDto {
    FaultDto {
        id: record.id,
        sequence_no: record.sequence_no,
        fault_date: record.fault_date.map(format_datetime),
        fault_name: record.fault_name,
        province_cause_analysis: record.province_cause_analysis,
        province_cause_category: record.province_cause_category,
        province_fault_type: record.province_fault_type,
        notification_level: record.notification_level,
        cause_category: record.cause_category,
        fault_duration_hours: record.fault_duration_hours,
        complaint_situation: record.complaint_situation,
        start_time: record.start_time.map(format_datetime),
        end_time: record.end_time.map(format_datetime),
        fault_cause: record.fault_cause,
        fault_handling: record.fault_handling,
        is_proactive_discovery: record.is_proactive_discovery,
        remarks: record.remarks,
        created_at: format_datetime(record.created_at),
        updated_at: format_datetime(record.updated_at),
    }
}
