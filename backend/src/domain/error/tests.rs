//! Tests for error construction, trace propagation and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("again"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_falls_back_when_message_is_blank() {
    let error = Error::forbidden("");
    assert_eq!(error.message(), "forbidden");
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn trace_id_is_none_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let error = Error::invalid_request("bad").with_trace_id(TRACE_ID);
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({ "code": "invalid_request", "message": "bad", "traceId": TRACE_ID })
    );
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "forbidden", "message": " " }));
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(json!({
            "code": "not_found",
            "message": "missing",
            "details": { "field": "websiteId" }
        }))
        .expect("payload is valid")
    })
    .await;

    assert!(error.trace_id().is_none());
    assert_eq!(error.details(), Some(&json!({ "field": "websiteId" })));
}
