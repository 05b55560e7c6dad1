//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, ItemValidationError, StoredTimestamp};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidTimestamp,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidValue => "invalid_value",
            Self::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Position of a nested entry inside an array field, e.g. `items[2].name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Nested {
    pub(crate) parent: FieldName,
    pub(crate) index: usize,
}

fn field_path(field: FieldName, nested: Option<Nested>) -> String {
    match nested {
        Some(Nested { parent, index }) => {
            format!("{}[{index}].{}", parent.as_str(), field.as_str())
        }
        None => field.as_str().to_owned(),
    }
}

pub(crate) fn missing_field_error(field: FieldName, nested: Option<Nested>) -> Error {
    let path = field_path(field, nested);
    Error::invalid_request(format!("missing required field: {path}")).with_details(json!({
        "field": path,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!(
        "{field} must be an ISO-8601 or YYYY-MM-DD HH:MM:SS timestamp"
    ))
    .with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidTimestamp.as_str(),
    }))
}

pub(crate) fn invalid_value_error(
    field: FieldName,
    nested: Option<Nested>,
    message: impl std::fmt::Display,
) -> Error {
    let path = field_path(field, nested);
    Error::invalid_request(format!("{path}: {message}")).with_details(json!({
        "field": path,
        "code": ErrorCode::InvalidValue.as_str(),
    }))
}

/// Map an item validation failure onto the offending request field.
pub(crate) fn item_validation_error(error: &ItemValidationError, nested: Option<Nested>) -> Error {
    invalid_value_error(FieldName::new(error.field()), nested, error)
}

/// Unwrap a required body field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field, None))
}

/// Unwrap a required field of an array entry.
pub(crate) fn require_nested<T>(
    value: Option<T>,
    field: FieldName,
    nested: Nested,
) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field, Some(nested)))
}

pub(crate) fn parse_timestamp(value: &str, field: FieldName) -> Result<StoredTimestamp, Error> {
    StoredTimestamp::parse(value).map_err(|_| invalid_timestamp_error(field, value))
}

pub(crate) fn parse_optional_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<StoredTimestamp>, Error> {
    value.map(|raw| parse_timestamp(&raw, field)).transpose()
}

/// Parse a path identifier. Values that are not identifiers can never name
/// a stored resource, so they surface as not found.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("{resource} {raw} not found")))
}
