use super::*;

#[test]
fn parse_login_grant_reads_token_and_admin() {
    let grant = parse_login_grant(r#"{"access_token":"tok-1","admin":"alice","token_type":"bearer"}"#).unwrap();
    assert_eq!(grant.access_token, "tok-1");
    assert_eq!(grant.admin, serde_json::json!("alice"));
}

#[test]
fn parse_login_grant_keeps_structured_admin() {
    let grant = parse_login_grant(r#"{"access_token":"tok-2","admin":{"id":7,"username":"root"}}"#).unwrap();
    assert_eq!(grant.admin["username"], "root");
}

#[test]
fn parse_login_grant_missing_admin_is_null() {
    let grant = parse_login_grant(r#"{"access_token":"tok-3"}"#).unwrap();
    assert!(grant.admin.is_null());
}

#[test]
fn parse_login_grant_without_token_errors() {
    let err = parse_login_grant(r#"{"admin":"alice"}"#).unwrap_err();
    assert!(matches!(err, BackendError::Parse(_)));
}

#[test]
fn parse_login_grant_empty_token_errors() {
    let err = parse_login_grant(r#"{"access_token":"","admin":"alice"}"#).unwrap_err();
    assert!(matches!(err, BackendError::Parse(_)));
}

#[test]
fn parse_login_grant_invalid_json_errors() {
    assert!(matches!(parse_login_grant("<html>").unwrap_err(), BackendError::Parse(_)));
}

#[test]
fn parse_enroll_receipt_reads_message() {
    let receipt = parse_enroll_receipt(r#"{"message":"ok"}"#).unwrap();
    assert_eq!(receipt.message, "ok");
}

#[test]
fn parse_enroll_receipt_missing_message_errors() {
    let err = parse_enroll_receipt(r#"{"status":"done"}"#).unwrap_err();
    assert!(err.to_string().contains("no message"));
}

#[test]
fn parse_enroll_receipt_null_message_errors() {
    assert!(parse_enroll_receipt(r#"{"message":null}"#).is_err());
}

#[test]
fn parse_enroll_receipt_non_string_message_is_stringified() {
    let receipt = parse_enroll_receipt(r#"{"message":42}"#).unwrap();
    assert_eq!(receipt.message, "42");
}

#[test]
fn rejected_error_display_includes_status() {
    let err = BackendError::Rejected { status: 401, body: "nope".into() };
    assert_eq!(err.to_string(), "backend rejected request (401): nope");
}
