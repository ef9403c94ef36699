//! Outreach API router — mounts the data-surface endpoints under
//! /api/v1/outreach.

use crate::handlers::{self, OutreachState};
use crate::store::OutreachStore;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Build the outreach router over a shared store.
/// Returns a Router that should be merged into the main app.
pub fn outreach_router(store: Arc<OutreachStore>) -> Router {
    let state = OutreachState { store };

    Router::new()
        // Campaigns
        .route(
            "/api/v1/outreach/campaigns",
            get(handlers::list_campaigns).post(handlers::create_campaign),
        )
        .route(
            "/api/v1/outreach/campaigns/:id",
            get(handlers::get_campaign)
                .put(handlers::update_campaign)
                .delete(handlers::delete_campaign),
        )
        // Enrollment
        .route(
            "/api/v1/outreach/campaigns/:id/enrollment",
            get(handlers::enrollment_details).post(handlers::replace_enrollment),
        )
        .route(
            "/api/v1/outreach/campaign-accounts",
            get(handlers::campaign_accounts),
        )
        // Aggregation
        .route(
            "/api/v1/outreach/contacts/filter",
            get(handlers::filter_contacts),
        )
        .route("/api/v1/outreach/stats", get(handlers::campaign_stats))
        // Audit log
        .route("/api/v1/outreach/audit-log", get(handlers::audit_log))
        .with_state(state)
}
