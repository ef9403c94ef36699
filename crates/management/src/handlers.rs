//! Axum REST handlers for the outreach data surface.

use crate::models::*;
use crate::store::OutreachStore;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use outreach_engine::aggregator::AggregatedContact;
use outreach_engine::enrollment::EnrollmentPayload;
use outreach_engine::stats::CampaignStat;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// Shared outreach state.
#[derive(Clone)]
pub struct OutreachState {
    pub store: Arc<OutreachStore>,
}

// ─── Campaigns ─────────────────────────────────────────────────────────────

pub async fn list_campaigns(State(state): State<OutreachState>) -> Json<Vec<Campaign>> {
    Json(state.store.list_campaigns())
}

pub async fn get_campaign(
    State(state): State<OutreachState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Campaign>, StatusCode> {
    state
        .store
        .get_campaign(id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_campaign(
    State(state): State<OutreachState>,
    Json(req): Json<CreateCampaignRequest>,
) -> (StatusCode, Json<Campaign>) {
    let campaign = state.store.create_campaign(req, "admin");
    metrics::counter!("outreach.campaigns.created").increment(1);
    (StatusCode::CREATED, Json(campaign))
}

pub async fn update_campaign(
    State(state): State<OutreachState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, StatusCode> {
    state
        .store
        .update_campaign(id, req, "admin")
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_campaign(
    State(state): State<OutreachState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.store.delete_campaign(id, "admin") {
        metrics::counter!("outreach.campaigns.deleted").increment(1);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// ─── Enrollment ────────────────────────────────────────────────────────────

pub async fn enrollment_details(
    State(state): State<OutreachState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentDetails>, StatusCode> {
    state
        .store
        .enrollment_details(id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn replace_enrollment(
    State(state): State<OutreachState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EnrollmentPayload>,
) -> Result<Json<EnrollmentDetails>, StatusCode> {
    let details = state
        .store
        .replace_enrollment(id, &req.account_names, "admin")
        .ok_or(StatusCode::NOT_FOUND)?;
    metrics::counter!("outreach.enrollment.replaced").increment(1);
    Ok(Json(details))
}

pub async fn campaign_accounts(
    State(state): State<OutreachState>,
) -> Json<Vec<CampaignAccount>> {
    Json(state.store.list_campaign_accounts())
}

// ─── Aggregation ───────────────────────────────────────────────────────────

pub async fn filter_contacts(
    State(state): State<OutreachState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<AggregatedContact>>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.filter_contacts(&params) {
        Ok(contacts) => {
            metrics::counter!("outreach.filter.queries").increment(1);
            Ok(Json(contacts))
        }
        Err(e) => {
            error!(error = %e, "Contact filter failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "filter_failed".to_string(),
                    message: e.to_string(),
                }),
            ))
        }
    }
}

pub async fn campaign_stats(State(state): State<OutreachState>) -> Json<Vec<CampaignStat>> {
    Json(state.store.campaign_stats())
}

// ─── Audit Log ─────────────────────────────────────────────────────────────

pub async fn audit_log(State(state): State<OutreachState>) -> Json<Vec<AuditLogEntry>> {
    Json(state.store.get_audit_log())
}
