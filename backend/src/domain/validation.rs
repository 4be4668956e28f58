//! Field-level validation errors shared by services and inbound adapters.
//!
//! Every helper yields an `invalid_request` error whose details name the
//! offending field with a machine-readable code.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValidationCode {
    MissingField,
    InvalidUuid,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Field name as clients spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ValidationCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ValidationCode::InvalidUuid.as_str(),
    }))
}

/// Parse a required UUID-valued field.
///
/// Absent and blank values are `missing_field`; anything else that does not
/// parse is `invalid_uuid`.
pub(crate) fn parse_required_uuid(value: Option<&str>, field: FieldName) -> Result<Uuid, Error> {
    let raw = value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| missing_field_error(field))?;
    Uuid::parse_str(raw).map_err(|_| invalid_uuid_error(field, raw))
}
