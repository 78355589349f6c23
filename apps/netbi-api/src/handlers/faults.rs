//! 故障记录 CRUD handlers
//!
//! - GET /fault/records - 分页筛选列表
//! - POST /fault/records - 创建记录
//! - GET /fault/records/{id} - 记录详情
//! - PUT /fault/records/{id} - 全字段覆盖更新
//! - DELETE /fault/records/{id} - 删除记录
//! - POST /fault/records/batch-delete - 按 id 列表批量删除
//! - POST /fault/import - 批量导入（逐行容错）
//! - GET /fault/export - 全量导出
//! - GET /fault/search - 关键字搜索
//!
//! 任何成功写入都会使去重值缓存失效。

use crate::AppState;
use crate::utils::response::{bad_request_error, fault_to_dto, not_found_error, storage_error};
use crate::utils::validation::{draft_from_request, filter_from_params, normalize_required};
use api_contract::{
    ApiResponse, BatchDeleteDto, BatchDeleteRequest, FaultDto, FaultListQuery, FaultPageDto,
    ImportFaultsRequest, ImportResultDto, SaveFaultRequest, SearchQuery,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use netbi_storage::FaultDraft;

/// 搜索结果上限（与原始报表页一致）。
const SEARCH_LIMIT: u64 = 50;

/// 批量导入结果里最多回传的错误条数。
const IMPORT_ERROR_PREVIEW: usize = 10;

#[derive(serde::Deserialize)]
pub struct FaultPath {
    pub(crate) fault_id: i64,
}

/// 分页筛选列表
pub async fn list_faults(
    State(state): State<AppState>,
    Query(query): Query<FaultListQuery>,
) -> Response {
    let filter = match filter_from_params(
        query.fault_type,
        query.cause_category,
        query.notification_level,
        query.duration_range,
        query.start_date,
        query.end_date,
        query.time_range,
    ) {
        Ok(filter) => filter,
        Err(response) => return response,
    };
    let per_page = query.per_page.unwrap_or(state.page_size).clamp(1, 100);
    let total = match state.fault_store.count_faults(&filter).await {
        Ok(total) => total,
        Err(err) => return storage_error(err),
    };
    let total_pages = total.div_ceil(per_page);
    // 页码越界时收敛到有效范围
    let mut page = query.page.unwrap_or(1).max(1);
    if total_pages > 0 && page > total_pages {
        page = total_pages;
    }
    let offset = (page - 1) * per_page;
    match state.fault_store.list_faults(&filter, offset, per_page).await {
        Ok(records) => {
            netbi_telemetry::record_query_served();
            let faults: Vec<FaultDto> = records.into_iter().map(fault_to_dto).collect();
            let data = FaultPageDto {
                faults,
                total,
                page,
                per_page,
                total_pages,
            };
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 记录详情
pub async fn get_fault(State(state): State<AppState>, Path(path): Path<FaultPath>) -> Response {
    match state.fault_store.find_fault(path.fault_id).await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(ApiResponse::success(fault_to_dto(record)))).into_response()
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 创建记录
pub async fn create_fault(
    State(state): State<AppState>,
    Json(req): Json<SaveFaultRequest>,
) -> Response {
    let draft = match draft_from_request(req) {
        Ok(draft) => draft,
        Err(message) => return bad_request_error(message),
    };
    match state.fault_store.create_fault(draft).await {
        Ok(record) => {
            state.distinct_cache.invalidate_all();
            netbi_telemetry::record_record_created();
            (StatusCode::OK, Json(ApiResponse::success(fault_to_dto(record)))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 全字段覆盖更新
pub async fn update_fault(
    State(state): State<AppState>,
    Path(path): Path<FaultPath>,
    Json(req): Json<SaveFaultRequest>,
) -> Response {
    let draft = match draft_from_request(req) {
        Ok(draft) => draft,
        Err(message) => return bad_request_error(message),
    };
    match state.fault_store.update_fault(path.fault_id, draft).await {
        Ok(Some(record)) => {
            state.distinct_cache.invalidate_all();
            netbi_telemetry::record_record_updated();
            (StatusCode::OK, Json(ApiResponse::success(fault_to_dto(record)))).into_response()
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 删除记录
pub async fn delete_fault(State(state): State<AppState>, Path(path): Path<FaultPath>) -> Response {
    match state.fault_store.delete_fault(path.fault_id).await {
        Ok(true) => {
            state.distinct_cache.invalidate_all();
            netbi_telemetry::record_records_deleted(1);
            (StatusCode::OK, Json(ApiResponse::success(()))).into_response()
        }
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 批量删除
pub async fn batch_delete_faults(
    State(state): State<AppState>,
    Json(req): Json<BatchDeleteRequest>,
) -> Response {
    if req.ids.is_empty() {
        return bad_request_error("ids required");
    }
    match state.fault_store.delete_faults(&req.ids).await {
        Ok(deleted) => {
            state.distinct_cache.invalidate_all();
            netbi_telemetry::record_records_deleted(deleted);
            let data = BatchDeleteDto { deleted };
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 批量导入：逐行解析与校验，合法行一次性写入。
pub async fn import_faults(
    State(state): State<AppState>,
    Json(req): Json<ImportFaultsRequest>,
) -> Response {
    let total_rows = req.records.len() as u64;
    let mut drafts: Vec<FaultDraft> = Vec::with_capacity(req.records.len());
    let mut errors: Vec<String> = Vec::new();
    for (index, record) in req.records.into_iter().enumerate() {
        match parse_import_row(record) {
            Ok(draft) => drafts.push(draft),
            Err(message) => errors.push(format!("第{}行: {message}", index + 1)),
        }
    }

    let success_count = if drafts.is_empty() {
        0
    } else {
        match state.fault_store.import_faults(drafts).await {
            Ok(count) => count,
            Err(err) => return storage_error(err),
        }
    };
    if success_count > 0 {
        state.distinct_cache.invalidate_all();
    }
    netbi_telemetry::record_rows_imported(success_count);
    netbi_telemetry::record_import_row_errors(errors.len() as u64);

    let error_count = errors.len() as u64;
    errors.truncate(IMPORT_ERROR_PREVIEW);
    let data = ImportResultDto {
        total_rows,
        success_count,
        error_count,
        errors,
    };
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 单行解析 + 写入前校验（与存储层校验一致，提前拦下以便逐行报错）。
fn parse_import_row(record: SaveFaultRequest) -> Result<FaultDraft, String> {
    let draft = draft_from_request(record)?;
    netbi_storage::validate_draft(&draft).map_err(|err| err.to_string())?;
    Ok(draft)
}

/// 全量导出
pub async fn export_faults(State(state): State<AppState>) -> Response {
    match state.fault_store.export_faults().await {
        Ok(records) => {
            netbi_telemetry::record_query_served();
            let data: Vec<FaultDto> = records.into_iter().map(fault_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 关键字搜索
pub async fn search_faults(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let keyword = match normalize_required(query.keyword, "keyword") {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.fault_store.search_faults(&keyword, SEARCH_LIMIT).await {
        Ok(records) => {
            netbi_telemetry::record_query_served();
            let data: Vec<FaultDto> = records.into_iter().map(fault_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}
