use api_contract::{FaultListQuery, OverviewDto, SaveFaultRequest, TimeBucketDto};
use serde_json::Value;

#[test]
fn overview_dto_is_camel_case() {
    let dto = OverviewDto {
        total_faults: 120,
        monthly_faults: 8,
        avg_duration: 4.52,
        proactive_rate: 63.33,
        complaint_count: 5,
    };
    let value = serde_json::to_value(dto).expect("serialize");
    assert!(value.get("totalFaults").is_some());
    assert!(value.get("monthlyFaults").is_some());
    assert!(value.get("avgDuration").is_some());
    assert!(value.get("proactiveRate").is_some());
    assert!(value.get("complaintCount").is_some());
    assert!(value.get("total_faults").is_none());
}

#[test]
fn time_bucket_keeps_null_avg_duration() {
    let dto = TimeBucketDto {
        date: "2024-03".to_string(),
        count: 3,
        duration_sum: 0.0,
        avg_duration: None,
    };
    let value = serde_json::to_value(dto).expect("serialize");
    // 全部时长缺失的桶序列化为 null，而不是 0
    assert_eq!(value.get("avgDuration"), Some(&Value::Null));
}

#[test]
fn save_request_accepts_camel_case() {
    let payload = r#"{
        "sequenceNo": 7,
        "faultDate": "2024-03-05T14:30",
        "faultName": "骨干网中断",
        "causeCategory": "硬件",
        "faultDurationHours": 2.5,
        "isProactiveDiscovery": "是"
    }"#;
    let req: SaveFaultRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.sequence_no, Some(7));
    assert_eq!(req.fault_date.as_deref(), Some("2024-03-05T14:30"));
    assert_eq!(req.cause_category.as_deref(), Some("硬件"));
    assert_eq!(req.fault_duration_hours, Some(2.5));
}

#[test]
fn list_query_fields_are_optional() {
    let query: FaultListQuery = serde_json::from_str("{}").expect("parse");
    assert!(query.page.is_none());
    assert!(query.fault_type.is_none());
    assert!(query.duration_range.is_none());
}
