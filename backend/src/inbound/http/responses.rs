//! Small response bodies shared by several handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement returned by deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuccessBody {
    /// Always `true`; failures use the error envelope instead.
    pub success: bool,
}

impl SuccessBody {
    /// The one value handlers return.
    pub const OK: Self = Self { success: true };
}

/// Outcome of a bulk deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedBody {
    /// Always `true`.
    pub success: bool,
    /// Number of rows actually removed.
    pub deleted: usize,
}
