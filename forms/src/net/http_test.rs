use super::*;
use serde_json::json;

#[test]
fn success_body_is_decoded() {
    let resp = classify_response(201, r#"{"id":101,"name":"John Doe"}"#).unwrap();
    assert_eq!(resp.status, 201);
    assert_eq!(resp.data, json!({ "id": 101, "name": "John Doe" }));
}

#[test]
fn empty_success_body_is_null() {
    let resp = classify_response(204, "  ").unwrap();
    assert_eq!(resp.data, Value::Null);
}

#[test]
fn plain_text_success_body_is_kept_as_string() {
    let resp = classify_response(200, "User registered successfully").unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.data, json!("User registered successfully"));
}

#[test]
fn error_status_keeps_json_body() {
    let err = classify_response(409, r#"{"message":"Email already taken"}"#).unwrap_err();
    assert!(matches!(err, RequestError::Status { status: 409, .. }));
    assert_eq!(err.response_message(), Some("Email already taken"));
}

#[test]
fn error_status_with_non_json_body_has_no_body() {
    let err = classify_response(502, "Bad Gateway").unwrap_err();
    match err {
        RequestError::Status { status, body } => {
            assert_eq!(status, 502);
            assert!(body.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn client_builds_with_default_timeouts() {
    assert!(ReqwestHttpClient::new(HttpTimeouts::default()).is_ok());
}
