//! Entity shapes shared by the store, the aggregation engine, and the API.
//!
//! These mirror the rows the outreach database backend returns; the engine
//! consumes them as opaque, already-queried data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contact scraped or imported into the outreach database.
///
/// Descriptive attributes are all optional; consumers render absent values
/// as "N/A". This crate only ever reads contacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub fullname: Option<String>,
    pub username: Option<String>,
    pub organisation: Option<String>,
    pub tags: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: Option<String>,
}

/// Lightweight campaign reference as embedded in joined log rows and
/// consumed by the statistics aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRef {
    pub id: Uuid,
    pub name: String,
}

/// One outreach attempt linking a contact to a campaign.
///
/// Log entries are immutable facts appended by the outreach backend and are
/// never mutated or deleted here. `status` stays a raw string: the
/// statistics rule compares it case-sensitively, display styling elsewhere
/// compares case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignLogEntry {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub campaign_id: Uuid,
    pub status: Option<String>,
    /// Absent on the wire means "no reply".
    #[serde(default)]
    pub replied: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

/// A campaign-log row joined with its contact and campaign, as returned by
/// the outreach query surface. A `None` contact means the foreign key could
/// not be resolved; aggregation skips such rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignLogRow {
    pub status: Option<String>,
    #[serde(default)]
    pub replied: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub contact: Option<Contact>,
    pub campaign: Option<CampaignRef>,
}

/// Health of a worker account enrolled in a campaign, as reported by the
/// outreach backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Healthy,
    RateLimited,
    Banned,
}

/// What a registered Telegram worker account is used for. Wire spellings
/// match the account-sessions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountPurpose {
    Outreach,
    #[serde(rename = "Keyword_Monitor")]
    KeywordMonitor,
    #[serde(rename = "Keyword_Searching")]
    KeywordSearching,
    #[serde(rename = "Group_Member_Scraping")]
    GroupMemberScraping,
}

impl Contact {
    /// Convenience constructor for an id-only contact; descriptive fields
    /// start absent.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            fullname: None,
            username: None,
            organisation: None,
            tags: None,
            contact_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_status_uses_wire_spelling() {
        let json = serde_json::to_string(&AccountStatus::RateLimited).unwrap();
        assert_eq!(json, "\"RATE_LIMITED\"");
        let back: AccountStatus = serde_json::from_str("\"HEALTHY\"").unwrap();
        assert_eq!(back, AccountStatus::Healthy);
    }

    #[test]
    fn log_row_defaults_replied_to_false() {
        let row: CampaignLogRow = serde_json::from_str(
            r#"{"status":"Contacted","sent_at":null,"contact":null,"campaign":null}"#,
        )
        .unwrap();
        assert!(!row.replied);
    }
}
