// SPDX-License-Identifier: Apache-2.0
//! Infra endpoints, the dashboard aggregate, and the response helpers
//! shared by every handler module.

use crate::config::CONFIG_SCHEMA_VERSION;
use crate::store::StoreError;
use crate::{AppState, CRATE_NAME};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use baret_api::{map_error_status, ApiError, ApiErrorCode};
use baret_core::{level_distribution, sha256_hex, RiskLevel};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

pub(crate) fn status_for(code: ApiErrorCode) -> StatusCode {
    StatusCode::from_u16(map_error_status(code)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub(crate) fn api_error_response(status: StatusCode, err: ApiError) -> Response {
    (status, Json(json!({ "error": err }))).into_response()
}

pub(crate) fn if_none_match(headers: &HeaderMap) -> Option<String> {
    headers
        .get("if-none-match")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
}

pub(crate) fn put_cache_headers(headers: &mut HeaderMap, ttl: Duration, etag: &str) {
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs())) {
        headers.insert("cache-control", value);
    }
    if let Ok(value) = HeaderValue::from_str(etag) {
        headers.insert("etag", value);
    }
}

/// Finishes a handler that failed parameter validation.
pub(crate) async fn rejected(
    state: &AppState,
    route: &'static str,
    started: Instant,
    err: ApiError,
) -> Response {
    let status = status_for(err.code);
    let response = api_error_response(status, err);
    state
        .metrics
        .observe_request(route, status, started.elapsed())
        .await;
    response
}

/// Any store failure collapses to a generic internal error; the cause goes
/// to the log, never to the client.
pub(crate) async fn store_failure(
    state: &AppState,
    route: &'static str,
    started: Instant,
    err: &StoreError,
) -> Response {
    tracing::error!(route, error = %err, "store query failed");
    let response = api_error_response(StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal());
    state
        .metrics
        .observe_request(route, StatusCode::INTERNAL_SERVER_ERROR, started.elapsed())
        .await;
    response
}

pub(crate) fn note_query_elapsed(state: &AppState, route: &'static str, elapsed: Duration) {
    if elapsed > state.api.slow_query_threshold {
        tracing::warn!(route, elapsed_ms = elapsed.as_millis() as u64, "slow store query");
    }
}

pub(crate) async fn plain_json(
    state: &AppState,
    route: &'static str,
    started: Instant,
    payload: serde_json::Value,
) -> Response {
    let response = Json(payload).into_response();
    state
        .metrics
        .observe_request(route, StatusCode::OK, started.elapsed())
        .await;
    response
}

/// Stats responses are content-addressed: the ETag is the SHA-256 of the
/// serialized payload, so a matching `If-None-Match` short-circuits to 304
/// with no body.
pub(crate) async fn cacheable_json(
    state: &AppState,
    route: &'static str,
    started: Instant,
    headers: &HeaderMap,
    payload: serde_json::Value,
) -> Response {
    let etag = format!(
        "\"{}\"",
        sha256_hex(&serde_json::to_vec(&payload).unwrap_or_default())
    );
    if if_none_match(headers).as_deref() == Some(etag.as_str()) {
        let mut response = StatusCode::NOT_MODIFIED.into_response();
        put_cache_headers(response.headers_mut(), state.api.stats_cache_ttl, &etag);
        state
            .metrics
            .observe_request(route, StatusCode::NOT_MODIFIED, started.elapsed())
            .await;
        return response;
    }

    let mut response = Json(payload).into_response();
    put_cache_headers(response.headers_mut(), state.api.stats_cache_ttl, &etag);
    state
        .metrics
        .observe_request(route, StatusCode::OK, started.elapsed())
        .await;
    response
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let response = (StatusCode::OK, "ok").into_response();
    state
        .metrics
        .observe_request("/healthz", StatusCode::OK, started.elapsed())
        .await;
    response
}

/// Readiness requires both the serving flag and a live store probe.
pub(crate) async fn readyz_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let store_ok = state.store.ping().await.is_ok();
    let (status, body) = if state.ready.load(Ordering::Relaxed) && store_ok {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready")
    };
    let response = (status, body).into_response();
    state
        .metrics
        .observe_request("/readyz", status, started.elapsed())
        .await;
    response
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let body = state.metrics.render_prometheus().await;
    let response = (StatusCode::OK, body).into_response();
    state
        .metrics
        .observe_request("/metrics", StatusCode::OK, started.elapsed())
        .await;
    response
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let payload = json!({
        "service": "baret",
        "crate": CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "config_schema_version": CONFIG_SCHEMA_VERSION,
    });
    let mut response = Json(payload).into_response();
    if let Ok(value) = HeaderValue::from_str("public, max-age=300") {
        response.headers_mut().insert("cache-control", value);
    }
    state
        .metrics
        .observe_request("/v1/version", StatusCode::OK, started.elapsed())
        .await;
    response
}

/// Cross-module aggregate for the landing dashboard. All fetches run
/// concurrently; one failure fails the whole response.
pub(crate) async fn dashboard_summary_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let route = "/v1/dashboard/summary";

    let fetch_started = Instant::now();
    let fetched = tokio::try_join!(
        state.store.module_counts(),
        state.store.open_incident_count(),
        state.store.assessment_ratings(None),
    );
    let (modules, open_incidents, ratings) = match fetched {
        Ok(values) => values,
        Err(err) => return store_failure(&state, route, started, &err).await,
    };
    note_query_elapsed(&state, route, fetch_started.elapsed());

    let levels = level_distribution(&ratings);
    let payload = json!({
        "modules": {
            "incidents": modules.incidents,
            "risk_assessments": modules.risk_assessments,
            "audits": modules.audits,
            "trainings": modules.trainings,
            "equipment": modules.equipment,
            "tasks": modules.tasks,
        },
        "open_incidents": open_incidents,
        "critical_risks": levels[3],
        "risk_levels": {
            "labels": RiskLevel::ALL.iter().map(|level| level.label()).collect::<Vec<_>>(),
            "counts": levels,
            "colors": RiskLevel::ALL.iter().map(|level| level.css_color()).collect::<Vec<_>>(),
        },
    });
    plain_json(&state, route, started, payload).await
}
