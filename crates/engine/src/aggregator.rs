//! Contact aggregation — groups joined campaign-log rows into per-contact
//! outreach histories for table rendering.

use chrono::{DateTime, Utc};
use outreach_core::types::{CampaignLogRow, Contact};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One outreach attempt as attached to an aggregated contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignActivity {
    pub name: String,
    pub status: String,
    pub replied: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

/// A contact plus its full outreach history, one activity record per log row
/// referencing it. Serializes flat, so the wire shape is the contact's own
/// fields with `campaign_activity` alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedContact {
    #[serde(flatten)]
    pub contact: Contact,
    pub campaign_activity: Vec<CampaignActivity>,
}

/// Group log rows by their embedded contact.
///
/// Single pass over the input. Rows whose contact reference could not be
/// resolved are skipped entirely. Output order is first-seen contact order;
/// each contact's activity keeps the input row order (callers supply rows
/// ordered by `sent_at` descending). A contact with zero log rows never
/// appears — that population is served by the planner's not-outreached
/// branch instead.
pub fn aggregate_contacts(rows: &[CampaignLogRow]) -> Vec<AggregatedContact> {
    let mut slot_by_id: HashMap<Uuid, usize> = HashMap::new();
    let mut grouped: Vec<AggregatedContact> = Vec::new();

    for row in rows {
        let Some(contact) = &row.contact else {
            continue;
        };
        let slot = *slot_by_id.entry(contact.id).or_insert_with(|| {
            grouped.push(AggregatedContact {
                contact: contact.clone(),
                campaign_activity: Vec::new(),
            });
            grouped.len() - 1
        });
        grouped[slot].campaign_activity.push(CampaignActivity {
            name: row
                .campaign
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Unknown Campaign".to_string()),
            status: row
                .status
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            replied: row.replied,
            sent_at: row.sent_at,
        });
    }

    grouped
}
