//! Member entity model.

use phonelive_core::types::DbId;
use serde::{Deserialize, Serialize};

/// A member (user account) belonging to a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: DbId,
    pub company_id: DbId,
    pub role_id: DbId,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}
