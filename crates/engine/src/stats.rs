//! Per-campaign statistics — reduces the full campaign-log into dashboard
//! counters.

use outreach_core::types::{CampaignLogEntry, CampaignRef};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Dashboard tile for one campaign.
///
/// `reply_rate` is pre-rendered to one decimal digit ("25.0"); consumers
/// display it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignStat {
    pub name: String,
    pub total_contacts: usize,
    pub messages_sent: u64,
    pub replies: u64,
    pub reply_rate: String,
}

#[derive(Default)]
struct StatAccumulator {
    contacts: HashSet<Uuid>,
    messages_sent: u64,
    replies: u64,
}

/// Reduce all log entries into one `CampaignStat` per input campaign, in
/// input campaign order.
///
/// A campaign with zero log rows still yields a stat with zeroed counters
/// and a "0.0" rate. Log rows referencing an unknown campaign are skipped.
/// `total_contacts` counts distinct contact ids, not rows. The
/// `messages_sent` comparison is exact-match, case-sensitive on "Contacted";
/// the looser case-insensitive comparison used for display styling is a UI
/// concern and must not leak in here.
pub fn campaign_statistics(
    campaigns: &[CampaignRef],
    logs: &[CampaignLogEntry],
) -> Vec<CampaignStat> {
    let mut by_campaign: HashMap<Uuid, StatAccumulator> = campaigns
        .iter()
        .map(|c| (c.id, StatAccumulator::default()))
        .collect();

    for log in logs {
        let Some(acc) = by_campaign.get_mut(&log.campaign_id) else {
            continue;
        };
        acc.contacts.insert(log.contact_id);
        if log.status.as_deref() == Some("Contacted") {
            acc.messages_sent += 1;
        }
        if log.replied {
            acc.replies += 1;
        }
    }

    campaigns
        .iter()
        .map(|campaign| {
            let (total_contacts, messages_sent, replies) =
                match by_campaign.get(&campaign.id) {
                    Some(acc) => (acc.contacts.len(), acc.messages_sent, acc.replies),
                    None => (0, 0, 0),
                };
            let reply_rate = if messages_sent > 0 {
                format!("{:.1}", replies as f64 / messages_sent as f64 * 100.0)
            } else {
                "0.0".to_string()
            };
            CampaignStat {
                name: campaign.name.clone(),
                total_contacts,
                messages_sent,
                replies,
                reply_rate,
            }
        })
        .collect()
}
