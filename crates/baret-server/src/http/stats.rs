// SPDX-License-Identifier: Apache-2.0
//! The four `/v1/stats/*` aggregates. Each one fetches its window slices
//! concurrently, buckets by month, and serves through the ETag cache.

use super::handlers::{cacheable_json, note_query_elapsed, store_failure};
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use baret_api::params::parse_stats_params;
use baret_core::{
    level_distribution, monthly_counts, ChartSeries, RiskLevel, StatusTally, MONTHLY_SERIES_COLOR,
};
use baret_model::{IncidentSeverity, IncidentStatus, ScheduleStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Instant;

fn monthly_chart(label: &str, dates: &[NaiveDate], now: DateTime<Utc>) -> ChartSeries {
    let series = monthly_counts(dates, now);
    ChartSeries::uniform(label, series.labels, series.counts, MONTHLY_SERIES_COLOR)
}

pub(crate) async fn incidents_stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let route = "/v1/stats/incidents";
    let window = parse_stats_params(&query).window;
    let now = Utc::now();
    let since = window.start(now);

    let fetch_started = Instant::now();
    let fetched = tokio::try_join!(
        state.store.incident_dates_since(since),
        state.store.incident_status_counts(since),
        state.store.incident_severity_counts(since),
    );
    let (dates, status_rows, severity_rows) = match fetched {
        Ok(values) => values,
        Err(err) => return store_failure(&state, route, started, &err).await,
    };
    note_query_elapsed(&state, route, fetch_started.elapsed());

    let status = StatusTally::<IncidentStatus>::from_grouped(&status_rows);
    let severity = StatusTally::<IncidentSeverity>::from_grouped(&severity_rows);
    let payload = json!({
        "window": window.as_token(),
        "monthly": monthly_chart("Olay Sayısı", &dates, now),
        "status": { "labels": status.labels(), "counts": status.counts() },
        "severity": { "labels": severity.labels(), "counts": severity.counts() },
    });
    cacheable_json(&state, route, started, &headers, payload).await
}

pub(crate) async fn risks_stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let route = "/v1/stats/risks";
    let window = parse_stats_params(&query).window;
    let now = Utc::now();
    let since = window.start(now);

    let fetch_started = Instant::now();
    let fetched = tokio::try_join!(
        state.store.assessment_dates_since(since),
        state.store.assessment_ratings(Some(since)),
    );
    let (dates, ratings) = match fetched {
        Ok(values) => values,
        Err(err) => return store_failure(&state, route, started, &err).await,
    };
    note_query_elapsed(&state, route, fetch_started.elapsed());

    let levels = level_distribution(&ratings);
    let payload = json!({
        "window": window.as_token(),
        "monthly": monthly_chart("Risk Değerlendirmesi", &dates, now),
        "levels": {
            "labels": RiskLevel::ALL.iter().map(|level| level.label()).collect::<Vec<_>>(),
            "counts": levels,
            "colors": RiskLevel::ALL.iter().map(|level| level.css_color()).collect::<Vec<_>>(),
        },
    });
    cacheable_json(&state, route, started, &headers, payload).await
}

pub(crate) async fn trainings_stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let route = "/v1/stats/trainings";
    let window = parse_stats_params(&query).window;
    let now = Utc::now();
    let since = window.start(now);

    let fetch_started = Instant::now();
    let fetched = tokio::try_join!(
        state.store.training_dates_since(since),
        state.store.training_status_counts(since),
    );
    let (dates, status_rows) = match fetched {
        Ok(values) => values,
        Err(err) => return store_failure(&state, route, started, &err).await,
    };
    note_query_elapsed(&state, route, fetch_started.elapsed());

    let status = StatusTally::<ScheduleStatus>::from_grouped(&status_rows);
    let payload = json!({
        "window": window.as_token(),
        "monthly": monthly_chart("Eğitim Sayısı", &dates, now),
        "status": { "labels": status.labels(), "counts": status.counts() },
        "completion_rate": completion_rate(&status),
    });
    cacheable_json(&state, route, started, &headers, payload).await
}

pub(crate) async fn audits_stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let route = "/v1/stats/audits";
    let window = parse_stats_params(&query).window;
    let now = Utc::now();
    let since = window.start(now);

    let fetch_started = Instant::now();
    let fetched = tokio::try_join!(
        state.store.audit_dates_since(since),
        state.store.audit_status_counts(since),
    );
    let (dates, status_rows) = match fetched {
        Ok(values) => values,
        Err(err) => return store_failure(&state, route, started, &err).await,
    };
    note_query_elapsed(&state, route, fetch_started.elapsed());

    let status = StatusTally::<ScheduleStatus>::from_grouped(&status_rows);
    let payload = json!({
        "window": window.as_token(),
        "monthly": monthly_chart("Denetim Sayısı", &dates, now),
        "status": { "labels": status.labels(), "counts": status.counts() },
    });
    cacheable_json(&state, route, started, &headers, payload).await
}

/// Completed share of all scheduled trainings in the window, one decimal,
/// zero when the window is empty.
fn completion_rate(status: &StatusTally<ScheduleStatus>) -> f64 {
    let total = status.total();
    if total == 0 {
        return 0.0;
    }
    let completed = status.get(ScheduleStatus::Completed);
    (completed as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_rate_rounds_to_one_decimal() {
        let status = StatusTally::<ScheduleStatus>::from_grouped(&[
            ("COMPLETED".to_string(), 2),
            ("PLANNED".to_string(), 1),
        ]);
        assert!((completion_rate(&status) - 66.7).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_window_reports_zero_completion() {
        let status = StatusTally::<ScheduleStatus>::zeroed();
        assert!((completion_rate(&status) - 0.0).abs() < f64::EPSILON);
    }
}
