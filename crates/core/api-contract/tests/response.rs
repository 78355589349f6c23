use api_contract::ApiResponse;

#[test]
fn api_response_success() {
    let response = ApiResponse::success("ok");
    assert!(response.success);
    assert!(response.data.is_some());
    assert!(response.error.is_none());
}

#[test]
fn api_response_error() {
    let response = ApiResponse::<()>::error("INVALID.REQUEST", "month must be YYYY-MM");
    assert!(!response.success);
    assert!(response.data.is_none());
    let error = response.error.expect("error");
    assert_eq!(error.code, "INVALID.REQUEST");
}
