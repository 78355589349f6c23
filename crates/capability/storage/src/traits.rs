//! 存储接口 Trait 定义
//!
//! 定义故障记录存储的异步接口 FaultStore。
//!
//! 设计原则：
//! - handler 层禁止直接连 SQL，统一通过本接口
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发
//! - 过滤（日期范围、类别等值、时长区间）在存储层完成，
//!   分析引擎只消费物化后的样本切片

use crate::error::StorageError;
use crate::models::{FaultDraft, FaultFilter, FaultRecord};
use async_trait::async_trait;
use domain::{Dimension, FaultSample};

/// 故障记录存储接口。
#[async_trait]
pub trait FaultStore: Send + Sync {
    /// 统计满足过滤条件的记录数。
    async fn count_faults(&self, filter: &FaultFilter) -> Result<u64, StorageError>;

    /// 分页列出记录，按故障日期降序（日期缺失的排最后）。
    async fn list_faults(
        &self,
        filter: &FaultFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FaultRecord>, StorageError>;

    /// 查找指定记录。
    async fn find_fault(&self, fault_id: i64) -> Result<Option<FaultRecord>, StorageError>;

    /// 创建新记录（id 与 created_at/updated_at 由存储层分配）。
    async fn create_fault(&self, draft: FaultDraft) -> Result<FaultRecord, StorageError>;

    /// 全字段覆盖更新；记录不存在返回 None。
    async fn update_fault(
        &self,
        fault_id: i64,
        draft: FaultDraft,
    ) -> Result<Option<FaultRecord>, StorageError>;

    /// 删除指定记录；不存在返回 false。
    async fn delete_fault(&self, fault_id: i64) -> Result<bool, StorageError>;

    /// 按 id 列表批量删除，返回实际删除数。
    async fn delete_faults(&self, fault_ids: &[i64]) -> Result<u64, StorageError>;

    /// 批量导入（调用方已逐行校验），返回写入行数。
    async fn import_faults(&self, drafts: Vec<FaultDraft>) -> Result<u64, StorageError>;

    /// 关键字搜索（故障名称/原因/处理/备注），故障日期降序。
    async fn search_faults(
        &self,
        keyword: &str,
        limit: u64,
    ) -> Result<Vec<FaultRecord>, StorageError>;

    /// 全量导出，按创建时间降序。
    async fn export_faults(&self) -> Result<Vec<FaultRecord>, StorageError>;

    /// 物化分析样本：满足过滤条件且故障日期非空的记录。
    async fn list_samples(&self, filter: &FaultFilter) -> Result<Vec<FaultSample>, StorageError>;

    /// 某维度的去重非空值，排序后截断到 limit。
    async fn distinct_values(
        &self,
        dimension: Dimension,
        limit: u64,
    ) -> Result<Vec<String>, StorageError>;
}
