//! Operation log DTOs.

use phonelive_core::types::DbId;
use serde::Serialize;

/// Actions recorded to the operation log by this feature.
pub const ACTION_SINGLE_SEARCH: &str = "phone_live_status.single_search";
pub const ACTION_BULK_SEARCH: &str = "phone_live_status.bulk_search";
pub const ACTION_EXPORT_SUMMARY: &str = "phone_live_status.export_summary";
pub const ACTION_EXPORT_DETAILS: &str = "phone_live_status.export_details";

/// DTO for appending an operation log entry.
#[derive(Debug, Clone, Serialize)]
pub struct NewLogOperation {
    pub member_id: DbId,
    pub company_id: DbId,
    pub action: String,
    pub description: String,
}
