//! Domain failures shared by the data and API layers.

use crate::types::DbId;

/// Why a phone live status operation was refused.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity is absent or belongs to another company.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    /// Caller input outside the accepted range or format.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No usable session token.
    #[error("not authenticated: {0}")]
    Unauthorized(String),

    /// Session is valid but the member may not perform the action.
    #[error("access denied: {0}")]
    Forbidden(String),
}
