//! Repository for members.

use phonelive_core::types::DbId;

use crate::client::{UpstreamClient, UpstreamError, NO_QUERY};
use crate::config::UpstreamConfig;
use crate::models::member::Member;

/// Read access to member accounts.
#[derive(Debug, Clone)]
pub struct MemberRepo {
    client: UpstreamClient,
}

impl MemberRepo {
    pub fn new(config: &UpstreamConfig, http: &reqwest::Client) -> Self {
        Self {
            client: UpstreamClient::new(config, http),
        }
    }

    /// Find a member by id. Returns `None` when the upstream answers 404.
    pub async fn find_by_id(&self, id: DbId) -> Result<Option<Member>, UpstreamError> {
        self.client
            .get_optional(&format!("/members/{id}"), NO_QUERY)
            .await
    }
}
