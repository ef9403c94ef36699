//! HTTP server assembly and the Prometheus metrics exporter.

use crate::gateway;
use crate::rest::{self, AppState};
use axum::routing::get;
use axum::Router;
use outreach_clients::ServiceClients;
use outreach_core::config::AppConfig;
use outreach_management::{outreach_router, OutreachStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Main API server: outreach data surface + service gateway + ops routes.
pub struct ApiServer {
    config: AppConfig,
    store: Arc<OutreachStore>,
    clients: ServiceClients,
}

impl ApiServer {
    pub fn new(config: AppConfig) -> Self {
        let clients = ServiceClients::new(&config.services);
        Self {
            config,
            store: Arc::new(OutreachStore::new()),
            clients,
        }
    }

    /// Start the HTTP server. Blocks until shutdown.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let state = AppState {
            node_id: self.config.node_id.clone(),
            start_time: Instant::now(),
        };

        let app = Router::new()
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            .with_state(state)
            // Outreach data surface
            .merge(outreach_router(self.store.clone()))
            // External service gateway
            .merge(gateway::gateway_router(self.clients.clone()))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics server on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        Ok(())
    }
}
