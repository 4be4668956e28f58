//! Request-shape validation for inbound HTTP adapters.
//!
//! Field errors come from [`crate::domain::validation`] so handlers and
//! services report missing or malformed fields identically.

use actix_web::web;
use serde_json::json;

use crate::domain::Error;

pub(crate) use crate::domain::validation::{FieldName, missing_field_error, parse_required_uuid};

const INVALID_BODY: &str = "invalid_body";

/// Error for a request body that is not the expected JSON shape.
pub(crate) fn invalid_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request("request body must be valid JSON").with_details(json!({
        "reason": reason.to_string(),
        "code": INVALID_BODY,
    }))
}

/// JSON extractor settings mapping malformed bodies to the domain error shape.
pub fn json_body_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| actix_web::Error::from(invalid_body_error(err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn body_errors_carry_the_reason() {
        let error = invalid_body_error("expected value at line 1 column 1");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details");
        assert_eq!(details["code"], "invalid_body");
        assert_eq!(details["reason"], "expected value at line 1 column 1");
    }
}
