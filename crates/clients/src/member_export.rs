//! Client for the group-member-export service — scrapes the member list of
//! a Telegram group.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};

/// Envelope the export service wraps every answer in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub status: String,
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

#[derive(Clone)]
pub struct MemberExportClient {
    http: reqwest::Client,
    base_url: String,
}

impl MemberExportClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Export the member rows of one group. A 200 answer whose envelope
    /// status is not "success" is still a failure.
    pub async fn export_group(
        &self,
        group_id: &str,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        let url = format!("{}/export-group/{}", self.base_url, group_id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }
        let envelope: ExportResponse = response
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })?;
        if envelope.status != "success" {
            return Err(ClientError::Service(
                envelope
                    .message
                    .unwrap_or_else(|| "export failed without detail".to_string()),
            ));
        }
        Ok(envelope.data)
    }
}
