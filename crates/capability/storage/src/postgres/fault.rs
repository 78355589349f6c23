//! Postgres 故障记录实现
//!
//! 表结构（migrations/seed 预先执行）：
//!
//! ```sql
//! create table fault_record (
//!     id bigserial primary key,
//!     sequence_no bigint,
//!     fault_date timestamp,
//!     fault_name text,
//!     province_cause_analysis text,
//!     province_cause_category text,
//!     province_fault_type text,
//!     notification_level text,
//!     cause_category text,
//!     fault_duration_hours double precision,
//!     complaint_situation text,
//!     start_time timestamp,
//!     end_time timestamp,
//!     fault_cause text,
//!     fault_handling text,
//!     is_proactive_discovery text,
//!     remarks text,
//!     created_at timestamp not null,
//!     updated_at timestamp not null
//! );
//! create index idx_fault_record_fault_date on fault_record (fault_date);
//! ```

use crate::error::StorageError;
use crate::models::{FaultDraft, FaultFilter, FaultRecord};
use crate::traits::FaultStore;
use crate::validation::validate_draft;
use chrono::Utc;
use domain::{Dimension, FaultSample};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgFaultStore {
    pub pool: PgPool,
}

impl PgFaultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        Ok(Self { pool })
    }
}

const RECORD_COLUMNS: &str = "id, sequence_no, fault_date, fault_name, \
     province_cause_analysis, province_cause_category, province_fault_type, \
     notification_level, cause_category, fault_duration_hours, \
     complaint_situation, start_time, end_time, fault_cause, fault_handling, \
     is_proactive_discovery, remarks, created_at, updated_at";

/// 过滤条件占位：$1 故障类型、$2 原因分类、$3 通报级别、
/// $4/$5 时长区间 [low, high)、$6/$7 故障日期范围（含端点）。
/// 时长下界条件在 NULL 上为假，区间过滤自动排除无时长记录。
const FILTER_CLAUSE: &str = "($1::text is null or province_fault_type = $1) \
     and ($2::text is null or cause_category = $2) \
     and ($3::text is null or notification_level = $3) \
     and ($4::double precision is null or fault_duration_hours >= $4) \
     and ($5::double precision is null or fault_duration_hours < $5) \
     and ($6::timestamp is null or fault_date >= $6) \
     and ($7::timestamp is null or fault_date <= $7)";

struct FilterBinds {
    fault_type: Option<String>,
    cause_category: Option<String>,
    notification_level: Option<String>,
    duration_low: Option<f64>,
    duration_high: Option<f64>,
    date_from: Option<chrono::NaiveDateTime>,
    date_to: Option<chrono::NaiveDateTime>,
}

fn filter_binds(filter: &FaultFilter) -> FilterBinds {
    let (duration_low, duration_high) = match filter.duration_band {
        Some(band) => {
            let (low, high) = band.bounds();
            (Some(low), high)
        }
        None => (None, None),
    };
    FilterBinds {
        fault_type: filter.fault_type.clone(),
        cause_category: filter.cause_category.clone(),
        notification_level: filter.notification_level.clone(),
        duration_low,
        duration_high,
        date_from: filter.date_from,
        date_to: filter.date_to,
    }
}

fn row_to_record(row: &PgRow) -> Result<FaultRecord, StorageError> {
    Ok(FaultRecord {
        id: row.try_get("id")?,
        sequence_no: row.try_get("sequence_no")?,
        fault_date: row.try_get("fault_date")?,
        fault_name: row.try_get("fault_name")?,
        province_cause_analysis: row.try_get("province_cause_analysis")?,
        province_cause_category: row.try_get("province_cause_category")?,
        province_fault_type: row.try_get("province_fault_type")?,
        notification_level: row.try_get("notification_level")?,
        cause_category: row.try_get("cause_category")?,
        fault_duration_hours: row.try_get("fault_duration_hours")?,
        complaint_situation: row.try_get("complaint_situation")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        fault_cause: row.try_get("fault_cause")?,
        fault_handling: row.try_get("fault_handling")?,
        is_proactive_discovery: row.try_get("is_proactive_discovery")?,
        remarks: row.try_get("remarks")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait::async_trait]
impl FaultStore for PgFaultStore {
    async fn count_faults(&self, filter: &FaultFilter) -> Result<u64, StorageError> {
        let binds = filter_binds(filter);
        let sql = format!("select count(*) as total from fault_record where {FILTER_CLAUSE}");
        let row = sqlx::query(&sql)
            .bind(binds.fault_type)
            .bind(binds.cause_category)
            .bind(binds.notification_level)
            .bind(binds.duration_low)
            .bind(binds.duration_high)
            .bind(binds.date_from)
            .bind(binds.date_to)
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(total.max(0) as u64)
    }

    async fn list_faults(
        &self,
        filter: &FaultFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<FaultRecord>, StorageError> {
        let binds = filter_binds(filter);
        let sql = format!(
            "select {RECORD_COLUMNS} from fault_record \
             where {FILTER_CLAUSE} \
             order by fault_date desc nulls last, id desc \
             offset $8 limit $9"
        );
        let rows = sqlx::query(&sql)
            .bind(binds.fault_type)
            .bind(binds.cause_category)
            .bind(binds.notification_level)
            .bind(binds.duration_low)
            .bind(binds.duration_high)
            .bind(binds.date_from)
            .bind(binds.date_to)
            .bind(offset as i64)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn find_fault(&self, fault_id: i64) -> Result<Option<FaultRecord>, StorageError> {
        let sql = format!("select {RECORD_COLUMNS} from fault_record where id = $1");
        let row = sqlx::query(&sql)
            .bind(fault_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_record).transpose()
    }

    async fn create_fault(&self, draft: FaultDraft) -> Result<FaultRecord, StorageError> {
        validate_draft(&draft)?;
        let now = Utc::now().naive_utc();
        let sql = format!(
            "insert into fault_record (sequence_no, fault_date, fault_name, \
             province_cause_analysis, province_cause_category, province_fault_type, \
             notification_level, cause_category, fault_duration_hours, \
             complaint_situation, start_time, end_time, fault_cause, fault_handling, \
             is_proactive_discovery, remarks, created_at, updated_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $17) \
             returning {RECORD_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(draft.sequence_no)
            .bind(draft.fault_date)
            .bind(draft.fault_name)
            .bind(draft.province_cause_analysis)
            .bind(draft.province_cause_category)
            .bind(draft.province_fault_type)
            .bind(draft.notification_level)
            .bind(draft.cause_category)
            .bind(draft.fault_duration_hours)
            .bind(draft.complaint_situation)
            .bind(draft.start_time)
            .bind(draft.end_time)
            .bind(draft.fault_cause)
            .bind(draft.fault_handling)
            .bind(draft.is_proactive_discovery)
            .bind(draft.remarks)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        row_to_record(&row)
    }

    async fn update_fault(
        &self,
        fault_id: i64,
        draft: FaultDraft,
    ) -> Result<Option<FaultRecord>, StorageError> {
        validate_draft(&draft)?;
        let now = Utc::now().naive_utc();
        let sql = format!(
            "update fault_record set sequence_no = $2, fault_date = $3, fault_name = $4, \
             province_cause_analysis = $5, province_cause_category = $6, \
             province_fault_type = $7, notification_level = $8, cause_category = $9, \
             fault_duration_hours = $10, complaint_situation = $11, start_time = $12, \
             end_time = $13, fault_cause = $14, fault_handling = $15, \
             is_proactive_discovery = $16, remarks = $17, updated_at = $18 \
             where id = $1 \
             returning {RECORD_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(fault_id)
            .bind(draft.sequence_no)
            .bind(draft.fault_date)
            .bind(draft.fault_name)
            .bind(draft.province_cause_analysis)
            .bind(draft.province_cause_category)
            .bind(draft.province_fault_type)
            .bind(draft.notification_level)
            .bind(draft.cause_category)
            .bind(draft.fault_duration_hours)
            .bind(draft.complaint_situation)
            .bind(draft.start_time)
            .bind(draft.end_time)
            .bind(draft.fault_cause)
            .bind(draft.fault_handling)
            .bind(draft.is_proactive_discovery)
            .bind(draft.remarks)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_record).transpose()
    }

    async fn delete_fault(&self, fault_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from fault_record where id = $1")
            .bind(fault_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_faults(&self, fault_ids: &[i64]) -> Result<u64, StorageError> {
        if fault_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("delete from fault_record where id = any($1)")
            .bind(fault_ids.to_vec())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn import_faults(&self, drafts: Vec<FaultDraft>) -> Result<u64, StorageError> {
        if drafts.is_empty() {
            return Ok(0);
        }
        for draft in &drafts {
            validate_draft(draft)?;
        }
        let now = Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;
        let count = drafts.len() as u64;
        for draft in drafts {
            sqlx::query(
                "insert into fault_record (sequence_no, fault_date, fault_name, \
                 province_cause_analysis, province_cause_category, province_fault_type, \
                 notification_level, cause_category, fault_duration_hours, \
                 complaint_situation, start_time, end_time, fault_cause, fault_handling, \
                 is_proactive_discovery, remarks, created_at, updated_at) \
                 values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $17)",
            )
            .bind(draft.sequence_no)
            .bind(draft.fault_date)
            .bind(draft.fault_name)
            .bind(draft.province_cause_analysis)
            .bind(draft.province_cause_category)
            .bind(draft.province_fault_type)
            .bind(draft.notification_level)
            .bind(draft.cause_category)
            .bind(draft.fault_duration_hours)
            .bind(draft.complaint_situation)
            .bind(draft.start_time)
            .bind(draft.end_time)
            .bind(draft.fault_cause)
            .bind(draft.fault_handling)
            .bind(draft.is_proactive_discovery)
            .bind(draft.remarks)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(count)
    }

    async fn search_faults(
        &self,
        keyword: &str,
        limit: u64,
    ) -> Result<Vec<FaultRecord>, StorageError> {
        let pattern = format!("%{keyword}%");
        let sql = format!(
            "select {RECORD_COLUMNS} from fault_record \
             where fault_name like $1 \
             or fault_cause like $1 \
             or fault_handling like $1 \
             or remarks like $1 \
             order by fault_date desc nulls last, id desc \
             limit $2"
        );
        let rows = sqlx::query(&sql)
            .bind(pattern)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn export_faults(&self) -> Result<Vec<FaultRecord>, StorageError> {
        let sql = format!(
            "select {RECORD_COLUMNS} from fault_record order by created_at desc, id desc"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn list_samples(&self, filter: &FaultFilter) -> Result<Vec<FaultSample>, StorageError> {
        let binds = filter_binds(filter);
        let sql = format!(
            "select fault_date, fault_duration_hours, province_fault_type, \
             cause_category, notification_level, is_proactive_discovery, \
             complaint_situation \
             from fault_record \
             where fault_date is not null and {FILTER_CLAUSE} \
             order by fault_date asc"
        );
        let rows = sqlx::query(&sql)
            .bind(binds.fault_type)
            .bind(binds.cause_category)
            .bind(binds.notification_level)
            .bind(binds.duration_low)
            .bind(binds.duration_high)
            .bind(binds.date_from)
            .bind(binds.date_to)
            .fetch_all(&self.pool)
            .await?;
        let mut samples = Vec::with_capacity(rows.len());
        for row in rows {
            let occurred_at: chrono::NaiveDateTime = row.try_get("fault_date")?;
            let complaint: Option<String> = row.try_get("complaint_situation")?;
            samples.push(FaultSample {
                occurred_at,
                duration_hours: row.try_get("fault_duration_hours")?,
                fault_type: row.try_get("province_fault_type")?,
                cause_category: row.try_get("cause_category")?,
                notification_level: row.try_get("notification_level")?,
                proactive_flag: row.try_get("is_proactive_discovery")?,
                has_complaint: complaint
                    .as_deref()
                    .map(|text| !text.trim().is_empty())
                    .unwrap_or(false),
            });
        }
        Ok(samples)
    }

    async fn distinct_values(
        &self,
        dimension: Dimension,
        limit: u64,
    ) -> Result<Vec<String>, StorageError> {
        let column = match dimension {
            Dimension::FaultType => "province_fault_type",
            Dimension::CauseCategory => "cause_category",
            Dimension::NotificationLevel => "notification_level",
        };
        let sql = format!(
            "select distinct trim({column}) as value from fault_record \
             where {column} is not null and trim({column}) <> '' \
             order by value asc \
             limit $1"
        );
        let rows = sqlx::query(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            values.push(row.try_get("value")?);
        }
        Ok(values)
    }
}
