use chrono::{NaiveDate, NaiveDateTime};
use domain::Dimension;
use netbi_storage::{DurationBand, FaultDraft, FaultFilter, FaultStore, InMemoryFaultStore};

fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("date")
        .and_hms_opt(h, 0, 0)
        .expect("time")
}

fn draft(day: u32, duration: Option<f64>, cause: Option<&str>) -> FaultDraft {
    FaultDraft {
        fault_date: Some(ts(2024, 3, day, 9)),
        fault_name: Some(format!("故障-{day}")),
        cause_category: cause.map(str::to_string),
        fault_duration_hours: duration,
        ..FaultDraft::default()
    }
}

#[tokio::test]
async fn create_assigns_sequential_ids() {
    let store = InMemoryFaultStore::new();
    let first = store.create_fault(draft(1, Some(2.0), None)).await.expect("create");
    let second = store.create_fault(draft(2, Some(3.0), None)).await.expect("create");
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn create_rejects_negative_duration() {
    let store = InMemoryFaultStore::new();
    let err = store
        .create_fault(draft(1, Some(-0.5), None))
        .await
        .expect_err("invalid");
    assert!(err.is_invalid());
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn create_rejects_end_before_start() {
    let store = InMemoryFaultStore::new();
    let bad = FaultDraft {
        start_time: Some(ts(2024, 3, 2, 12)),
        end_time: Some(ts(2024, 3, 2, 10)),
        ..draft(2, Some(1.0), None)
    };
    let err = store.create_fault(bad).await.expect_err("invalid");
    assert!(err.is_invalid());
}

#[tokio::test]
async fn list_orders_by_fault_date_desc() {
    let store = InMemoryFaultStore::new();
    store.create_fault(draft(1, None, None)).await.expect("create");
    store.create_fault(draft(15, None, None)).await.expect("create");
    store.create_fault(draft(7, None, None)).await.expect("create");

    let listed = store
        .list_faults(&FaultFilter::default(), 0, 10)
        .await
        .expect("list");
    let days: Vec<u32> = listed
        .iter()
        .map(|r| chrono::Datelike::day(&r.fault_date.expect("date")))
        .collect();
    assert_eq!(days, vec![15, 7, 1]);
}

#[tokio::test]
async fn list_respects_offset_and_limit() {
    let store = InMemoryFaultStore::new();
    for day in 1..=5 {
        store.create_fault(draft(day, None, None)).await.expect("create");
    }
    let page = store
        .list_faults(&FaultFilter::default(), 2, 2)
        .await
        .expect("list");
    assert_eq!(page.len(), 2);
    let days: Vec<u32> = page
        .iter()
        .map(|r| chrono::Datelike::day(&r.fault_date.expect("date")))
        .collect();
    assert_eq!(days, vec![3, 2]);
}

#[tokio::test]
async fn filter_by_duration_band_skips_null_durations() {
    let store = InMemoryFaultStore::new();
    store.create_fault(draft(1, Some(1.0), None)).await.expect("create");
    store.create_fault(draft(2, Some(5.0), None)).await.expect("create");
    store.create_fault(draft(3, None, None)).await.expect("create");

    let filter = FaultFilter {
        duration_band: Some(DurationBand::From2To6),
        ..FaultFilter::default()
    };
    assert_eq!(store.count_faults(&filter).await.expect("count"), 1);
}

#[tokio::test]
async fn filter_by_date_range_is_inclusive() {
    let store = InMemoryFaultStore::new();
    for day in [5, 10, 20] {
        store.create_fault(draft(day, None, None)).await.expect("create");
    }
    let filter = FaultFilter {
        date_from: Some(ts(2024, 3, 5, 0)),
        date_to: Some(ts(2024, 3, 10, 23)),
        ..FaultFilter::default()
    };
    assert_eq!(store.count_faults(&filter).await.expect("count"), 2);
}

#[tokio::test]
async fn update_overwrites_all_fields() {
    let store = InMemoryFaultStore::new();
    let created = store
        .create_fault(draft(1, Some(2.0), Some("硬件")))
        .await
        .expect("create");

    // 全字段覆盖：未提供的原因分类被清空
    let updated = store
        .update_fault(created.id, draft(2, Some(4.0), None))
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(updated.fault_duration_hours, Some(4.0));
    assert_eq!(updated.cause_category, None);
    assert!(updated.updated_at >= created.updated_at);

    let missing = store
        .update_fault(9999, draft(2, None, None))
        .await
        .expect("update");
    assert!(missing.is_none());
}

#[tokio::test]
async fn delete_and_batch_delete() {
    let store = InMemoryFaultStore::new();
    let mut ids = Vec::new();
    for day in 1..=4 {
        ids.push(store.create_fault(draft(day, None, None)).await.expect("create").id);
    }
    assert!(store.delete_fault(ids[0]).await.expect("delete"));
    assert!(!store.delete_fault(ids[0]).await.expect("delete again"));

    let deleted = store
        .delete_faults(&[ids[1], ids[2], 9999])
        .await
        .expect("batch delete");
    assert_eq!(deleted, 2);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn import_writes_all_valid_rows() {
    let store = InMemoryFaultStore::new();
    let rows = vec![draft(1, Some(1.0), None), draft(2, Some(2.0), None)];
    let imported = store.import_faults(rows).await.expect("import");
    assert_eq!(imported, 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn search_scans_text_fields() {
    let store = InMemoryFaultStore::new();
    let mut with_cause = draft(1, None, None);
    with_cause.fault_cause = Some("光缆被挖断".to_string());
    store.create_fault(with_cause).await.expect("create");
    store.create_fault(draft(2, None, None)).await.expect("create");

    let hits = store.search_faults("光缆", 50).await.expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].fault_cause.as_deref(), Some("光缆被挖断"));
}

#[tokio::test]
async fn samples_skip_records_without_fault_date() {
    let store = InMemoryFaultStore::new();
    store.create_fault(draft(1, Some(2.0), None)).await.expect("create");
    let dateless = FaultDraft {
        fault_date: None,
        ..draft(2, Some(1.0), None)
    };
    store.create_fault(dateless).await.expect("create");

    let samples = store
        .list_samples(&FaultFilter::default())
        .await
        .expect("samples");
    assert_eq!(samples.len(), 1);
}

#[tokio::test]
async fn distinct_values_are_sorted_and_trimmed() {
    let store = InMemoryFaultStore::new();
    store.create_fault(draft(1, None, Some(" 硬件 "))).await.expect("create");
    store.create_fault(draft(2, None, Some("光缆"))).await.expect("create");
    store.create_fault(draft(3, None, Some("硬件"))).await.expect("create");
    store.create_fault(draft(4, None, Some(""))).await.expect("create");
    store.create_fault(draft(5, None, None)).await.expect("create");

    let values = store
        .distinct_values(Dimension::CauseCategory, 100)
        .await
        .expect("distinct");
    assert_eq!(values, vec!["光缆".to_string(), "硬件".to_string()]);
}
