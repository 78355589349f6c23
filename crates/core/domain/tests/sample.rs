use chrono::NaiveDate;
use domain::{Dimension, FaultSample, Granularity, UNKNOWN_LABEL, is_affirmative_flag, normalize_label};

fn ts(y: i32, m: u32, d: u32, h: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("date")
        .and_hms_opt(h, 0, 0)
        .expect("time")
}

#[test]
fn labels_normalize_to_unknown() {
    assert_eq!(normalize_label(None), UNKNOWN_LABEL);
    assert_eq!(normalize_label(Some("")), UNKNOWN_LABEL);
    assert_eq!(normalize_label(Some("   ")), UNKNOWN_LABEL);
    assert_eq!(normalize_label(Some(" 硬件 ")), "硬件");
}

#[test]
fn affirmative_flag_accepts_known_spellings() {
    assert_eq!(is_affirmative_flag(Some("是")), Some(true));
    assert_eq!(is_affirmative_flag(Some(" YES ")), Some(true));
    assert_eq!(is_affirmative_flag(Some("True")), Some(true));
    assert_eq!(is_affirmative_flag(Some("1")), Some(true));
    assert_eq!(is_affirmative_flag(Some("否")), Some(false));
    assert_eq!(is_affirmative_flag(Some("")), None);
    assert_eq!(is_affirmative_flag(None), None);
}

#[test]
fn bucket_keys_follow_granularity() {
    let when = ts(2024, 3, 5, 14);
    assert_eq!(Granularity::Hourly.bucket_key(when), "2024-03-05 14");
    assert_eq!(Granularity::Daily.bucket_key(when), "2024-03-05");
    assert_eq!(Granularity::Weekly.bucket_key(when), "2024-W10");
    assert_eq!(Granularity::Monthly.bucket_key(when), "2024-03");
}

#[test]
fn weekly_bucket_uses_iso_year() {
    // 2024-12-30 落在 2025 年第 1 个 ISO 周
    let when = ts(2024, 12, 30, 0);
    assert_eq!(Granularity::Weekly.bucket_key(when), "2025-W01");
}

#[test]
fn granularity_parse_round_trips() {
    for name in ["hourly", "daily", "weekly", "monthly"] {
        let parsed = Granularity::parse(name).expect("granularity");
        assert_eq!(parsed.as_str(), name);
    }
    assert!(Granularity::parse("quarterly").is_none());
}

#[test]
fn sample_exposes_dimensions() {
    let sample = FaultSample {
        occurred_at: ts(2024, 1, 1, 0),
        duration_hours: Some(2.0),
        fault_type: Some("传输".to_string()),
        cause_category: None,
        notification_level: Some("二级".to_string()),
        proactive_flag: Some("是".to_string()),
        has_complaint: false,
    };
    assert_eq!(sample.dimension_value(Dimension::FaultType), Some("传输"));
    assert_eq!(sample.dimension_value(Dimension::CauseCategory), None);
    assert_eq!(sample.is_proactive(), Some(true));
}
