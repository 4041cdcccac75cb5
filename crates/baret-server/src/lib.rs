// SPDX-License-Identifier: Apache-2.0
#![forbid(unsafe_code)]
//! HTTP service wiring: shared state, the router, middleware, and the
//! record-store seam.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use baret_query::QueryLimits;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

mod config;
mod http;
mod middleware;
mod store;
mod telemetry;

pub use config::{
    parse_auth_tokens, validate_startup_config_contract, ApiConfig, AuthToken,
    CONFIG_SCHEMA_VERSION,
};
pub use middleware::auth::AuthContext;
pub use store::fake::FakeStore;
pub use store::sqlite::SqliteStore;
pub use store::{RecordStore, StoreError};

use telemetry::RequestMetrics;

pub const CRATE_NAME: &str = "baret-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub api: ApiConfig,
    pub limits: QueryLimits,
    pub ready: Arc<AtomicBool>,
    pub(crate) metrics: Arc<RequestMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_config(store, ApiConfig::default(), QueryLimits::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<dyn RecordStore>, api: ApiConfig, limits: QueryLimits) -> Self {
        Self {
            store,
            api,
            limits,
            ready: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

/// Builds the full route table. Layer order matters: auth runs inside
/// request tracing, so rejected requests still get a span and an
/// `x-request-id` header.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/metrics", get(http::handlers::metrics_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .route(
            "/v1/dashboard/summary",
            get(http::handlers::dashboard_summary_handler),
        )
        .route("/v1/stats/incidents", get(http::stats::incidents_stats_handler))
        .route("/v1/stats/risks", get(http::stats::risks_stats_handler))
        .route("/v1/stats/trainings", get(http::stats::trainings_stats_handler))
        .route("/v1/stats/audits", get(http::stats::audits_stats_handler))
        .route("/v1/calendar", get(http::records::calendar_handler))
        .route("/v1/incidents", get(http::records::incidents_handler))
        .route("/v1/risk-assessments", get(http::records::assessments_handler))
        .route("/v1/risk-matrix", get(http::records::risk_matrix_handler))
        .route(
            "/v1/export/risk-assessments.xlsx",
            get(http::exports::export_sheet_handler),
        )
        .route(
            "/v1/export/risk-assessments.pdf",
            get(http::exports::export_document_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
