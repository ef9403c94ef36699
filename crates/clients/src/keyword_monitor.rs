//! Client for the keyword-monitor service — the daemon that watches Telegram
//! groups for configured keywords.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Monitoring config for one group, as stored by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredGroupData {
    pub title: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A monitored group flattened out of the service's chat-id-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredGroup {
    pub chat_id: i64,
    pub title: Option<String>,
    pub keywords: Vec<String>,
}

/// A group the monitor account has joined and could start watching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableGroup {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddGroupRequest {
    pub chat_id: i64,
    pub title: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateKeywordsRequest {
    pub keywords: Vec<String>,
}

/// The service keys its group listing by chat id; flatten to rows the
/// console can render.
pub fn flatten_groups(map: HashMap<i64, MonitoredGroupData>) -> Vec<MonitoredGroup> {
    let mut groups: Vec<MonitoredGroup> = map
        .into_iter()
        .map(|(chat_id, data)| MonitoredGroup {
            chat_id,
            title: data.title,
            keywords: data.keywords,
        })
        .collect();
    groups.sort_by_key(|g| g.chat_id);
    groups
}

#[derive(Clone)]
pub struct KeywordMonitorClient {
    http: reqwest::Client,
    base_url: String,
}

impl KeywordMonitorClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Currently monitored groups.
    pub async fn groups(&self) -> Result<Vec<MonitoredGroup>, ClientError> {
        let url = format!("{}/groups", self.base_url);
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
        let map: HashMap<i64, MonitoredGroupData> = response
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })?;
        Ok(flatten_groups(map))
    }

    /// Groups the monitor account could start watching. Answers
    /// `ClientError::NotReady` while the service's Telegram client is still
    /// connecting (HTTP 503).
    pub async fn available_groups(&self) -> Result<Vec<AvailableGroup>, ClientError> {
        let url = format!("{}/groups/available", self.base_url);
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
        if status.as_u16() == 503 {
            return Err(ClientError::NotReady);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }

    pub async fn add_group(&self, req: &AddGroupRequest) -> Result<(), ClientError> {
        let url = format!("{}/groups", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        expect_success(url, response).await
    }

    pub async fn delete_group(&self, chat_id: i64) -> Result<(), ClientError> {
        let url = format!("{}/groups/{}", self.base_url, chat_id);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        expect_success(url, response).await
    }

    pub async fn update_keywords(
        &self,
        chat_id: i64,
        keywords: Vec<String>,
    ) -> Result<(), ClientError> {
        let url = format!("{}/groups/{}/keywords", self.base_url, chat_id);
        let response = self
            .http
            .put(&url)
            .json(&UpdateKeywordsRequest { keywords })
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        expect_success(url, response).await
    }
}

async fn expect_success(url: String, response: reqwest::Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status {
            url,
            status: status.as_u16(),
            body,
        })
    }
}
