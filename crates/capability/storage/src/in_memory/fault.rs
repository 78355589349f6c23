//! 故障记录内存实现
//!
//! 仅用于本地测试和演示。

use crate::error::StorageError;
use crate::models::{FaultDraft, FaultFilter, FaultRecord};
use crate::traits::FaultStore;
use crate::validation::validate_draft;
use chrono::Utc;
use domain::{Dimension, FaultSample};
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

/// 故障记录内存存储
pub struct InMemoryFaultStore {
    records: RwLock<Vec<FaultRecord>>,
    next_id: AtomicI64,
}

impl InMemoryFaultStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// 当前记录总数（用于测试）
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn materialize(&self, draft: FaultDraft) -> FaultRecord {
        let now = Utc::now().naive_utc();
        FaultRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            sequence_no: draft.sequence_no,
            fault_date: draft.fault_date,
            fault_name: draft.fault_name,
            province_cause_analysis: draft.province_cause_analysis,
            province_cause_category: draft.province_cause_category,
            province_fault_type: draft.province_fault_type,
            notification_level: draft.notification_level,
            cause_category: draft.cause_category,
            fault_duration_hours: draft.fault_duration_hours,
            complaint_situation: draft.complaint_situation,
            start_time: draft.start_time,
            end_time: draft.end_time,
            fault_cause: draft.fault_cause,
            fault_handling: draft.fault_handling,
            is_proactive_discovery: draft.is_proactive_discovery,
            remarks: draft.remarks,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for InMemoryFaultStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 故障日期降序，缺失日期排最后，再按 id 降序。
fn sort_by_fault_date_desc(records: &mut [FaultRecord]) {
    records.sort_by(|a, b| match (b.fault_date, a.fault_date) {
        (Some(left), Some(right)) => left.cmp(&right).then(b.id.cmp(&a.id)),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => b.id.cmp(&a.id),
    });
}

fn text_matches(field: &Option<String>, keyword: &str) -> bool {
    field
        .as_deref()
        .map(|text| text.contains(keyword))
        .unwrap_or(false)
}

#[async_trait::async_trait]
impl FaultStore for InMemoryFaultStore {
    async fn count_faults(&self, filter: &FaultFilter) -> Result<u64, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(records.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn list_faults(
        &self,
        filter: &FaultFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FaultRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut selected: Vec<FaultRecord> = records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        sort_by_fault_date_desc(&mut selected);
        Ok(selected
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_fault(&self, fault_id: i64) -> Result<Option<FaultRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(records.iter().find(|r| r.id == fault_id).cloned())
    }

    async fn create_fault(&self, draft: FaultDraft) -> Result<FaultRecord, StorageError> {
        validate_draft(&draft)?;
        let record = self.materialize(draft);
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        records.push(record.clone());
        Ok(record)
    }

    async fn update_fault(
        &self,
        fault_id: i64,
        draft: FaultDraft,
    ) -> Result<Option<FaultRecord>, StorageError> {
        validate_draft(&draft)?;
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let record = match records.iter_mut().find(|r| r.id == fault_id) {
            Some(record) => record,
            None => return Ok(None),
        };
        // 全字段覆盖：None 即清空
        record.sequence_no = draft.sequence_no;
        record.fault_date = draft.fault_date;
        record.fault_name = draft.fault_name;
        record.province_cause_analysis = draft.province_cause_analysis;
        record.province_cause_category = draft.province_cause_category;
        record.province_fault_type = draft.province_fault_type;
        record.notification_level = draft.notification_level;
        record.cause_category = draft.cause_category;
        record.fault_duration_hours = draft.fault_duration_hours;
        record.complaint_situation = draft.complaint_situation;
        record.start_time = draft.start_time;
        record.end_time = draft.end_time;
        record.fault_cause = draft.fault_cause;
        record.fault_handling = draft.fault_handling;
        record.is_proactive_discovery = draft.is_proactive_discovery;
        record.remarks = draft.remarks;
        record.updated_at = Utc::now().naive_utc();
        Ok(Some(record.clone()))
    }

    async fn delete_fault(&self, fault_id: i64) -> Result<bool, StorageError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let before = records.len();
        records.retain(|r| r.id != fault_id);
        Ok(records.len() < before)
    }

    async fn delete_faults(&self, fault_ids: &[i64]) -> Result<u64, StorageError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let before = records.len();
        records.retain(|r| !fault_ids.contains(&r.id));
        Ok((before - records.len()) as u64)
    }

    async fn import_faults(&self, drafts: Vec<FaultDraft>) -> Result<u64, StorageError> {
        for draft in &drafts {
            validate_draft(draft)?;
        }
        let imported: Vec<FaultRecord> = drafts
            .into_iter()
            .map(|draft| self.materialize(draft))
            .collect();
        let count = imported.len() as u64;
        let mut records = self
            .records
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        records.extend(imported);
        Ok(count)
    }

    async fn search_faults(
        &self,
        keyword: &str,
        limit: u64,
    ) -> Result<Vec<FaultRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut selected: Vec<FaultRecord> = records
            .iter()
            .filter(|r| {
                text_matches(&r.fault_name, keyword)
                    || text_matches(&r.fault_cause, keyword)
                    || text_matches(&r.fault_handling, keyword)
                    || text_matches(&r.remarks, keyword)
            })
            .cloned()
            .collect();
        sort_by_fault_date_desc(&mut selected);
        selected.truncate(limit as usize);
        Ok(selected)
    }

    async fn export_faults(&self) -> Result<Vec<FaultRecord>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut selected: Vec<FaultRecord> = records.clone();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(selected)
    }

    async fn list_samples(&self, filter: &FaultFilter) -> Result<Vec<FaultSample>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(records
            .iter()
            .filter(|r| filter.matches(r))
            .filter_map(|r| r.to_sample())
            .collect())
    }

    async fn distinct_values(
        &self,
        dimension: Dimension,
        limit: u64,
    ) -> Result<Vec<String>, StorageError> {
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let mut values: Vec<String> = Vec::new();
        for record in records.iter() {
            let raw = match dimension {
                Dimension::FaultType => record.province_fault_type.as_deref(),
                Dimension::CauseCategory => record.cause_category.as_deref(),
                Dimension::NotificationLevel => record.notification_level.as_deref(),
            };
            if let Some(value) = raw {
                let trimmed = value.trim();
                if !trimmed.is_empty() && !values.iter().any(|v| v == trimmed) {
                    values.push(trimmed.to_string());
                }
            }
        }
        values.sort();
        values.truncate(limit as usize);
        Ok(values)
    }
}
