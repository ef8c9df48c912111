//! Role entity model.

use phonelive_core::types::DbId;
use serde::{Deserialize, Serialize};

/// A role with the permission names it grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}
