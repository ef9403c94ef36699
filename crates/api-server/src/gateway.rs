//! Gateway routes — thin proxies in front of the external Telegram services,
//! so the SPA has a single origin and error shape to deal with.
//!
//! Each round trip is independent and non-transactional; the only retry here
//! is the monitor's connecting state, everything else passes upstream errors
//! through.

use crate::rest::ErrorResponse;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use outreach_clients::account_sessions::{
    LoginRequest, SendCodeRequest, TelegramAccount, UpdateAccountRequest,
};
use outreach_clients::keyword_monitor::{
    AddGroupRequest, AvailableGroup, MonitoredGroup, UpdateKeywordsRequest,
};
use outreach_clients::keyword_search::{ChatSummary, SearchRequest, SearchResult};
use outreach_clients::workflow::WorkflowStartRequest;
use outreach_clients::{ClientError, ServiceClients};
use std::time::Duration;
use tracing::{error, warn};

/// Shared gateway state.
#[derive(Clone)]
pub struct GatewayState {
    pub clients: ServiceClients,
}

type GatewayResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

/// Map a client failure onto the response the SPA sees. Upstream status
/// codes and bodies pass through so the services' own `detail` strings stay
/// visible.
fn upstream_error(e: ClientError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, error) = match &e {
        ClientError::NotReady => (StatusCode::SERVICE_UNAVAILABLE, "upstream_not_ready"),
        ClientError::Status { status, .. } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            "upstream_error",
        ),
        ClientError::Transport { .. } => (StatusCode::BAD_GATEWAY, "upstream_unreachable"),
        ClientError::Decode { .. } => (StatusCode::BAD_GATEWAY, "upstream_invalid_response"),
        ClientError::Service(_) => (StatusCode::BAD_GATEWAY, "upstream_failure"),
    };
    error!(error = %e, "Gateway call failed");
    metrics::counter!("gateway.upstream_errors").increment(1);
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message: e.to_string(),
        }),
    )
}

// ─── Keyword monitor ───────────────────────────────────────────────────────

pub async fn monitor_groups(
    State(state): State<GatewayState>,
) -> GatewayResult<Json<Vec<MonitoredGroup>>> {
    state
        .clients
        .monitor
        .groups()
        .await
        .map(Json)
        .map_err(upstream_error)
}

/// The monitor answers 503 while its Telegram client connects; give it a
/// couple of chances before passing the 503 on.
pub async fn monitor_available_groups(
    State(state): State<GatewayState>,
) -> GatewayResult<Json<Vec<AvailableGroup>>> {
    for _ in 0..2 {
        match state.clients.monitor.available_groups().await {
            Err(ClientError::NotReady) => {
                warn!("Keyword monitor still connecting, retrying");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            other => return other.map(Json).map_err(upstream_error),
        }
    }
    state
        .clients
        .monitor
        .available_groups()
        .await
        .map(Json)
        .map_err(upstream_error)
}

pub async fn monitor_add_group(
    State(state): State<GatewayState>,
    Json(req): Json<AddGroupRequest>,
) -> GatewayResult<StatusCode> {
    state
        .clients
        .monitor
        .add_group(&req)
        .await
        .map(|_| StatusCode::CREATED)
        .map_err(upstream_error)
}

pub async fn monitor_delete_group(
    State(state): State<GatewayState>,
    Path(chat_id): Path<i64>,
) -> GatewayResult<StatusCode> {
    state
        .clients
        .monitor
        .delete_group(chat_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(upstream_error)
}

pub async fn monitor_update_keywords(
    State(state): State<GatewayState>,
    Path(chat_id): Path<i64>,
    Json(req): Json<UpdateKeywordsRequest>,
) -> GatewayResult<StatusCode> {
    state
        .clients
        .monitor
        .update_keywords(chat_id, req.keywords)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(upstream_error)
}

// ─── Keyword search ────────────────────────────────────────────────────────

pub async fn search_chats(
    State(state): State<GatewayState>,
) -> GatewayResult<Json<Vec<ChatSummary>>> {
    state
        .clients
        .search
        .chats()
        .await
        .map(Json)
        .map_err(upstream_error)
}

pub async fn search_messages(
    State(state): State<GatewayState>,
    Json(req): Json<SearchRequest>,
) -> GatewayResult<Json<SearchResult>> {
    state
        .clients
        .search
        .search(&req)
        .await
        .map(Json)
        .map_err(upstream_error)
}

// ─── Member export ─────────────────────────────────────────────────────────

pub async fn export_group_members(
    State(state): State<GatewayState>,
    Path(group_id): Path<String>,
) -> GatewayResult<Json<Vec<serde_json::Value>>> {
    state
        .clients
        .export
        .export_group(&group_id)
        .await
        .map(Json)
        .map_err(upstream_error)
}

// ─── Account sessions ──────────────────────────────────────────────────────

pub async fn list_accounts(
    State(state): State<GatewayState>,
) -> GatewayResult<Json<Vec<TelegramAccount>>> {
    state
        .clients
        .sessions
        .accounts()
        .await
        .map(Json)
        .map_err(upstream_error)
}

pub async fn update_account(
    State(state): State<GatewayState>,
    Path(phone_number): Path<String>,
    Json(req): Json<UpdateAccountRequest>,
) -> GatewayResult<StatusCode> {
    state
        .clients
        .sessions
        .update_account(&phone_number, &req)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(upstream_error)
}

pub async fn delete_account(
    State(state): State<GatewayState>,
    Path(phone_number): Path<String>,
) -> GatewayResult<StatusCode> {
    state
        .clients
        .sessions
        .delete_account(&phone_number)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(upstream_error)
}

pub async fn send_code(
    State(state): State<GatewayState>,
    Json(req): Json<SendCodeRequest>,
) -> GatewayResult<StatusCode> {
    state
        .clients
        .sessions
        .send_code(&req)
        .await
        .map(|_| StatusCode::ACCEPTED)
        .map_err(upstream_error)
}

pub async fn login(
    State(state): State<GatewayState>,
    Json(req): Json<LoginRequest>,
) -> GatewayResult<StatusCode> {
    state
        .clients
        .sessions
        .login(&req)
        .await
        .map(|_| StatusCode::CREATED)
        .map_err(upstream_error)
}

// ─── Workflow ──────────────────────────────────────────────────────────────

pub async fn start_workflow(
    State(state): State<GatewayState>,
    Json(req): Json<WorkflowStartRequest>,
) -> GatewayResult<StatusCode> {
    state
        .clients
        .workflow
        .start(req.id, &req.name)
        .await
        .map(|_| {
            metrics::counter!("gateway.workflows.started").increment(1);
            StatusCode::ACCEPTED
        })
        .map_err(upstream_error)
}

/// Build the gateway router with all proxy endpoints.
pub fn gateway_router(clients: ServiceClients) -> Router {
    let state = GatewayState { clients };

    Router::new()
        // Keyword monitor
        .route(
            "/api/v1/monitor/groups",
            get(monitor_groups).post(monitor_add_group),
        )
        .route(
            "/api/v1/monitor/groups/available",
            get(monitor_available_groups),
        )
        .route(
            "/api/v1/monitor/groups/:chat_id",
            delete(monitor_delete_group),
        )
        .route(
            "/api/v1/monitor/groups/:chat_id/keywords",
            put(monitor_update_keywords),
        )
        // Keyword search
        .route("/api/v1/search/chats", get(search_chats))
        .route("/api/v1/search", post(search_messages))
        // Member export
        .route(
            "/api/v1/export/groups/:group_id/members",
            get(export_group_members),
        )
        // Account sessions
        .route("/api/v1/sessions/accounts", get(list_accounts))
        .route(
            "/api/v1/sessions/accounts/:phone_number",
            put(update_account).delete(delete_account),
        )
        .route("/api/v1/sessions/send-code", post(send_code))
        .route("/api/v1/sessions/login", post(login))
        // Workflow trigger
        .route("/api/v1/workflow/start", post(start_workflow))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_maps_to_service_unavailable() {
        let (status, body) = upstream_error(ClientError::NotReady);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "upstream_not_ready");
    }

    #[test]
    fn upstream_status_codes_pass_through() {
        let (status, _) = upstream_error(ClientError::Status {
            url: "http://localhost:8008/groups".to_string(),
            status: 404,
            body: r#"{"detail":"group not monitored"}"#.to_string(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn service_envelope_failures_are_bad_gateway() {
        let (status, body) = upstream_error(ClientError::Service("group is private".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.message.contains("group is private"));
    }
}
