//! Outreach filter planning — picks one of two mutually exclusive retrieval
//! strategies and applies the shared contact predicate to either branch.

use crate::aggregator::{aggregate_contacts, AggregatedContact};
use outreach_core::types::{CampaignLogRow, Contact};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Field predicate applied to contacts on both branches: case-insensitive
/// substring match on organisation and tags, exact match on type. Blank or
/// whitespace-only fields are not applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactPredicate {
    pub organisation: Option<String>,
    pub tags: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: Option<String>,
}

impl ContactPredicate {
    pub fn matches(&self, contact: &Contact) -> bool {
        if let Some(needle) = trimmed(&self.organisation) {
            if !contains_ci(contact.organisation.as_deref(), needle) {
                return false;
            }
        }
        if let Some(needle) = trimmed(&self.tags) {
            if !contains_ci(contact.tags.as_deref(), needle) {
                return false;
            }
        }
        if let Some(wanted) = trimmed(&self.contact_type) {
            if contact.contact_type.as_deref() != Some(wanted) {
                return false;
            }
        }
        true
    }
}

fn trimmed(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(value) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}

/// The two retrieval strategies. Exactly one executes per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPlan {
    /// Join log rows with their contact and campaign; contacts with zero
    /// matching rows are absent from the result, never present-with-empty.
    Outreached,
    /// Contacts with no log row at all, each with empty activity attached.
    NotOutreached,
}

pub fn plan(include_outreached: bool) -> FilterPlan {
    if include_outreached {
        FilterPlan::Outreached
    } else {
        FilterPlan::NotOutreached
    }
}

/// Query surface the planner pulls from. The in-memory store implements
/// this with the two-phase id fetch; a SQL backend could instead satisfy
/// the not-outreached branch with a single anti-join.
pub trait OutreachSource {
    type Err;

    /// Joined log rows, ordered by `sent_at` descending.
    fn outreach_rows(&self) -> Result<Vec<CampaignLogRow>, Self::Err>;

    /// Every contact known to the store.
    fn all_contacts(&self) -> Result<Vec<Contact>, Self::Err>;

    /// Ids of contacts having at least one log row, regardless of campaign
    /// or predicate.
    fn outreached_contact_ids(&self) -> Result<HashSet<Uuid>, Self::Err>;
}

/// Execute the filter against a source. A retrieval failure surfaces as an
/// error with no partial results; both branches produce the same shape so
/// rendering stays branch-agnostic.
pub fn run_filter<S: OutreachSource>(
    source: &S,
    predicate: &ContactPredicate,
    include_outreached: bool,
) -> Result<Vec<AggregatedContact>, S::Err> {
    match plan(include_outreached) {
        FilterPlan::Outreached => {
            let mut rows = source.outreach_rows()?;
            rows.retain(|row| {
                row.contact
                    .as_ref()
                    .map_or(false, |contact| predicate.matches(contact))
            });
            Ok(aggregate_contacts(&rows))
        }
        FilterPlan::NotOutreached => {
            let outreached = source.outreached_contact_ids()?;
            let contacts = source.all_contacts()?;
            Ok(contacts
                .into_iter()
                .filter(|contact| {
                    !outreached.contains(&contact.id) && predicate.matches(contact)
                })
                .map(|contact| AggregatedContact {
                    contact,
                    campaign_activity: Vec::new(),
                })
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_core::types::CampaignRef;

    struct FixtureSource {
        rows: Vec<CampaignLogRow>,
        contacts: Vec<Contact>,
        fail: bool,
    }

    impl OutreachSource for FixtureSource {
        type Err = String;

        fn outreach_rows(&self) -> Result<Vec<CampaignLogRow>, String> {
            if self.fail {
                return Err("retrieval failed".to_string());
            }
            Ok(self.rows.clone())
        }

        fn all_contacts(&self) -> Result<Vec<Contact>, String> {
            if self.fail {
                return Err("retrieval failed".to_string());
            }
            Ok(self.contacts.clone())
        }

        fn outreached_contact_ids(&self) -> Result<HashSet<Uuid>, String> {
            if self.fail {
                return Err("retrieval failed".to_string());
            }
            Ok(self
                .rows
                .iter()
                .filter_map(|row| row.contact.as_ref().map(|c| c.id))
                .collect())
        }
    }

    fn contact(id: u128, organisation: Option<&str>, contact_type: Option<&str>) -> Contact {
        Contact {
            organisation: organisation.map(str::to_string),
            contact_type: contact_type.map(str::to_string),
            ..Contact::with_id(Uuid::from_u128(id))
        }
    }

    fn log_row(contact: Contact) -> CampaignLogRow {
        CampaignLogRow {
            status: Some("Contacted".to_string()),
            replied: false,
            sent_at: None,
            contact: Some(contact),
            campaign: Some(CampaignRef {
                id: Uuid::from_u128(1),
                name: "Launch".to_string(),
            }),
        }
    }

    fn fixture() -> FixtureSource {
        let outreached = contact(1, Some("Acme Corp"), Some("investor"));
        let never_contacted = contact(2, Some("acme labs"), Some("founder"));
        FixtureSource {
            rows: vec![log_row(outreached.clone())],
            contacts: vec![outreached, never_contacted],
            fail: false,
        }
    }

    #[test]
    fn outreached_branch_never_yields_empty_activity() {
        let source = fixture();
        let out = run_filter(&source, &ContactPredicate::default(), true).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].contact.id, Uuid::from_u128(1));
        assert!(!out[0].campaign_activity.is_empty());
    }

    #[test]
    fn not_outreached_branch_excludes_logged_contacts() {
        let source = fixture();
        let out = run_filter(&source, &ContactPredicate::default(), false).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].contact.id, Uuid::from_u128(2));
        assert!(out[0].campaign_activity.is_empty());
    }

    #[test]
    fn organisation_match_is_case_insensitive_substring() {
        let source = fixture();
        let predicate = ContactPredicate {
            organisation: Some("ACME".to_string()),
            ..ContactPredicate::default()
        };

        let with_logs = run_filter(&source, &predicate, true).unwrap();
        assert_eq!(with_logs.len(), 1);
        let without_logs = run_filter(&source, &predicate, false).unwrap();
        assert_eq!(without_logs.len(), 1);
    }

    #[test]
    fn type_match_is_exact() {
        let source = fixture();
        let predicate = ContactPredicate {
            contact_type: Some("Investor".to_string()),
            ..ContactPredicate::default()
        };

        assert!(run_filter(&source, &predicate, true).unwrap().is_empty());

        let exact = ContactPredicate {
            contact_type: Some("investor".to_string()),
            ..ContactPredicate::default()
        };
        assert_eq!(run_filter(&source, &exact, true).unwrap().len(), 1);
    }

    #[test]
    fn blank_predicate_fields_are_not_applied() {
        let source = fixture();
        let predicate = ContactPredicate {
            organisation: Some("   ".to_string()),
            tags: Some(String::new()),
            contact_type: None,
        };

        assert_eq!(run_filter(&source, &predicate, false).unwrap().len(), 1);
    }

    #[test]
    fn a_contact_without_the_field_never_matches_a_set_filter() {
        let mut source = fixture();
        source.contacts.push(contact(3, None, None));
        let predicate = ContactPredicate {
            organisation: Some("acme".to_string()),
            ..ContactPredicate::default()
        };

        let out = run_filter(&source, &predicate, false).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].contact.id, Uuid::from_u128(2));
    }

    #[test]
    fn retrieval_failure_surfaces_with_no_partial_results() {
        let mut source = fixture();
        source.fail = true;

        assert!(run_filter(&source, &ContactPredicate::default(), true).is_err());
        assert!(run_filter(&source, &ContactPredicate::default(), false).is_err());
    }
}
