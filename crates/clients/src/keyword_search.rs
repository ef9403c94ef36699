//! Client for the keyword-search service — historical message search across
//! the account's chats, with a generated summary.

use crate::error::ClientError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A chat the search account can see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: i64,
    pub name: String,
}

/// Unified search request. Dates are naive local datetimes, serialized
/// `YYYY-MM-DDTHH:MM:SS` as the service expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub keywords: Vec<String>,
    pub chats: Vec<i64>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// Search result: matched messages (opaque to the console, rendered as-is)
/// plus the service-generated HTML summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
    #[serde(default)]
    pub summary_html: String,
}

#[derive(Clone)]
pub struct KeywordSearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl KeywordSearchClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn chats(&self) -> Result<Vec<ChatSummary>, ClientError> {
        let url = format!("{}/api/chats", self.base_url);
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
        response
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }

    pub async fn search(&self, req: &SearchRequest) -> Result<SearchResult, ClientError> {
        let url = format!("{}/api/search", self.base_url);
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
        let status = response.status();
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
}
