use netbi_telemetry::{new_request_ids, record_query_served, record_rows_imported};

#[test]
fn request_ids_non_empty() {
    let ids = new_request_ids();
    assert!(!ids.request_id.is_empty());
    assert!(!ids.trace_id.is_empty());
    assert_ne!(ids.request_id, ids.trace_id);
}

#[test]
fn counters_accumulate() {
    let before = netbi_telemetry::metrics().snapshot();
    record_query_served();
    record_rows_imported(3);
    let after = netbi_telemetry::metrics().snapshot();
    assert!(after.queries_served >= before.queries_served + 1);
    assert!(after.rows_imported >= before.rows_imported + 3);
}
