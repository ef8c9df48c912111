//! Repository for the member operation log.

use crate::client::{UpstreamClient, UpstreamError};
use crate::config::UpstreamConfig;
use crate::models::log_operation::NewLogOperation;

/// Append-only access to the operation log.
#[derive(Debug, Clone)]
pub struct LogOperationRepo {
    client: UpstreamClient,
}

impl LogOperationRepo {
    pub fn new(config: &UpstreamConfig, http: &reqwest::Client) -> Self {
        Self {
            client: UpstreamClient::new(config, http),
        }
    }

    pub async fn create(&self, entry: &NewLogOperation) -> Result<(), UpstreamError> {
        self.client.post_unit("/log-operations", entry).await
    }
}
