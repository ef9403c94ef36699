//! Client for the workflow engine's master-outreach trigger.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Trigger body: the campaign the workflow should start working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStartRequest {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone)]
pub struct WorkflowClient {
    http: reqwest::Client,
    start_url: String,
}

impl WorkflowClient {
    /// `start_url` is the full webhook URL, not a base.
    pub fn new(http: reqwest::Client, start_url: &str) -> Self {
        Self {
            http,
            start_url: start_url.to_string(),
        }
    }

    /// Fire-and-forget activation: one POST, no polling, no server-side
    /// transaction spanning it and anything else.
    pub async fn start(&self, campaign_id: Uuid, campaign_name: &str) -> Result<(), ClientError> {
        let req = WorkflowStartRequest {
            id: campaign_id,
            name: campaign_name.to_string(),
        };
        let response = self
            .http
            .post(&self.start_url)
            .json(&req)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: self.start_url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                url: self.start_url.clone(),
                status: status.as_u16(),
                body,
            });
        }
        info!(campaign = %campaign_name, "Master workflow activated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_request_carries_id_and_name() {
        let req = WorkflowStartRequest {
            id: Uuid::from_u128(7),
            name: "Q3 Fund Outreach".to_string(),
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["name"], "Q3 Fund Outreach");
        assert_eq!(body["id"], "00000000-0000-0000-0000-000000000007");
    }
}
