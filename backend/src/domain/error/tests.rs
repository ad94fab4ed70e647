//! Tests for the domain error payload and trace propagation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn conflict_error() -> Error {
    Error::conflict("room is already booked").with_details(json!({"roomId": 7}))
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("slow"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn only_service_unavailable_is_transient() {
    assert!(ErrorCode::ServiceUnavailable.is_transient());
    assert!(!ErrorCode::Conflict.is_transient());
    assert!(!ErrorCode::NotFound.is_transient());
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::not_found("room not found") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields(conflict_error: Error) {
    let value = serde_json::to_value(&conflict_error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "room is already booked",
            "details": {"roomId": 7},
        })
    );
}

#[rstest]
fn deserialises_trace_id_alias() {
    let payload = json!({
        "code": "not_found",
        "message": "missing",
        "trace_id": TRACE_ID,
    });
    let error: Error = serde_json::from_value(payload).expect("deserialise error");
    assert_eq!(error.trace_id(), Some(TRACE_ID));
    assert_eq!(error.to_string(), "missing");
}
