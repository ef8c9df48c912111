//! Repository for roles.

use phonelive_core::types::DbId;

use crate::client::{UpstreamClient, UpstreamError, NO_QUERY};
use crate::config::UpstreamConfig;
use crate::models::role::Role;

/// Provides read operations for roles.
#[derive(Debug, Clone)]
pub struct RoleRepo {
    client: UpstreamClient,
}

impl RoleRepo {
    pub fn new(config: &UpstreamConfig, http: &reqwest::Client) -> Self {
        Self {
            client: UpstreamClient::new(config, http),
        }
    }

    /// Find a role by its id, including its permission list.
    pub async fn find_by_id(&self, id: DbId) -> Result<Option<Role>, UpstreamError> {
        self.client.get_optional(&format!("/roles/{id}"), NO_QUERY).await
    }
}
