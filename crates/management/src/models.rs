//! Outreach domain types — campaigns, worker accounts, enrollment, audit log.

use chrono::{DateTime, Utc};
use outreach_core::types::{AccountPurpose, AccountStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Campaign ──────────────────────────────────────────────────────────────

/// A named outreach effort with its message template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub message: Option<String>,
}

// ─── Enrollment / worker accounts ──────────────────────────────────────────

/// A Telegram account registered with the session service and usable as an
/// outreach worker when its purpose says so.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerAccount {
    pub account_name: String,
    pub purpose: AccountPurpose,
}

/// One enrollment row: an account working a campaign, with the health the
/// outreach backend last reported for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignAccount {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub account_name: String,
    pub status: AccountStatus,
    pub cooldown_until: Option<DateTime<Utc>>,
}

/// The partition handed to the enrollment editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentDetails {
    pub available_accounts: Vec<String>,
    pub enrolled_accounts: Vec<String>,
}

// ─── Filtering ─────────────────────────────────────────────────────────────

/// Query parameters of the contact filter endpoint. `include_outreached`
/// defaults to true, matching the console's initial toggle state.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterParams {
    pub organisation: Option<String>,
    pub tags: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: Option<String>,
    #[serde(default = "default_include_outreached")]
    pub include_outreached: bool,
}

fn default_include_outreached() -> bool {
    true
}

// ─── Audit log ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub user: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Enroll,
}

// ─── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
