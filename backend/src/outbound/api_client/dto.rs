//! Small request and response bodies that have no domain counterpart.

use serde::{Deserialize, Serialize};

use crate::domain::{ApplyMode, GroceryItemId};

#[derive(Debug, Serialize)]
pub(super) struct IdsBody<'a> {
    pub(super) ids: &'a [GroceryItemId],
}

#[derive(Debug, Serialize)]
pub(super) struct ApplyBody {
    pub(super) mode: ApplyMode,
}

#[derive(Debug, Serialize)]
pub(super) struct ArchiveBody {
    pub(super) clear: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct SuccessDto {
    #[serde(default)]
    pub(super) success: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeletedDto {
    pub(super) deleted: usize,
}

/// The service's `{error, code, ...}` envelope; only the message matters
/// to callers.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: String,
}
