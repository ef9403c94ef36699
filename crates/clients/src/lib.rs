//! Typed HTTP clients for the backend services the console fronts.
//!
//! Each service is an independent deployment; these clients transcribe its
//! HTTP contract and nothing more. All Telegram work (monitoring, searching,
//! scraping, session handling, message sending) happens on the other side of
//! these calls.

pub mod account_sessions;
pub mod error;
pub mod keyword_monitor;
pub mod keyword_search;
pub mod member_export;
pub mod workflow;

pub use account_sessions::AccountSessionsClient;
pub use error::ClientError;
pub use keyword_monitor::KeywordMonitorClient;
pub use keyword_search::KeywordSearchClient;
pub use member_export::MemberExportClient;
pub use workflow::WorkflowClient;

use outreach_core::config::ServicesConfig;

/// All service clients bundled for the gateway, sharing one connection pool.
#[derive(Clone)]
pub struct ServiceClients {
    pub monitor: KeywordMonitorClient,
    pub search: KeywordSearchClient,
    pub export: MemberExportClient,
    pub sessions: AccountSessionsClient,
    pub workflow: WorkflowClient,
}

impl ServiceClients {
    pub fn new(services: &ServicesConfig) -> Self {
        let http = reqwest::Client::new();
        Self {
            monitor: KeywordMonitorClient::new(http.clone(), &services.keyword_monitor_url),
            search: KeywordSearchClient::new(http.clone(), &services.keyword_search_url),
            export: MemberExportClient::new(http.clone(), &services.member_export_url),
            sessions: AccountSessionsClient::new(http.clone(), &services.account_sessions_url),
            workflow: WorkflowClient::new(http, &services.workflow_start_url),
        }
    }
}
