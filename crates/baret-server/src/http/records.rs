// SPDX-License-Identifier: Apache-2.0
//! Calendar feed, record listings, and the static risk matrix.

use super::handlers::{note_query_elapsed, plain_json, rejected, store_failure};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Response;
use baret_api::params::{
    parse_assessment_list_params, parse_calendar_params, parse_incident_list_params,
};
use baret_core::{merge_events, risk_matrix, risk_score, RiskLevel};
use baret_model::RiskAssessment;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Instant;

pub(crate) async fn calendar_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let route = "/v1/calendar";
    let params = match parse_calendar_params(&query) {
        Ok(params) => params,
        Err(err) => return rejected(&state, route, started, err).await,
    };

    let fetch_started = Instant::now();
    let fetched = tokio::try_join!(
        state.store.tasks_between(params.start, params.end),
        state.store.trainings_between(params.start, params.end),
        state.store.audits_between(params.start, params.end),
        state.store.equipment_between(params.start, params.end),
    );
    let (tasks, trainings, audits, equipment) = match fetched {
        Ok(values) => values,
        Err(err) => return store_failure(&state, route, started, &err).await,
    };
    note_query_elapsed(&state, route, fetch_started.elapsed());

    let events = merge_events(&tasks, &trainings, &audits, &equipment);
    let payload = json!({
        "start": params.start,
        "end": params.end,
        "events": events,
    });
    plain_json(&state, route, started, payload).await
}

pub(crate) async fn incidents_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let route = "/v1/incidents";
    let filter = match parse_incident_list_params(&query, &state.limits) {
        Ok(filter) => filter,
        Err(err) => return rejected(&state, route, started, err).await,
    };

    let fetch_started = Instant::now();
    let items = match state.store.list_incidents(&filter, &state.limits).await {
        Ok(items) => items,
        Err(err) => return store_failure(&state, route, started, &err).await,
    };
    note_query_elapsed(&state, route, fetch_started.elapsed());

    let count = items.len();
    let payload = json!({ "items": items, "count": count });
    plain_json(&state, route, started, payload).await
}

pub(crate) async fn assessments_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let started = Instant::now();
    let route = "/v1/risk-assessments";
    let filter = match parse_assessment_list_params(&query, &state.limits) {
        Ok(filter) => filter,
        Err(err) => return rejected(&state, route, started, err).await,
    };

    let fetch_started = Instant::now();
    let rows = match state.store.list_assessments(&filter, &state.limits).await {
        Ok(rows) => rows,
        Err(err) => return store_failure(&state, route, started, &err).await,
    };
    note_query_elapsed(&state, route, fetch_started.elapsed());

    let items: Vec<Value> = rows.iter().map(assessment_with_level).collect();
    let payload = json!({ "items": items, "count": items.len() });
    plain_json(&state, route, started, payload).await
}

pub(crate) async fn risk_matrix_handler(State(state): State<AppState>) -> Response {
    let started = Instant::now();
    let payload = json!({ "cells": risk_matrix() });
    plain_json(&state, "/v1/risk-matrix", started, payload).await
}

/// Listing rows carry the derived score and level alongside the stored
/// fields; the level is recomputed here, never persisted.
fn assessment_with_level(assessment: &RiskAssessment) -> Value {
    let level = RiskLevel::from_ratings(assessment.severity, assessment.likelihood);
    let mut value = serde_json::to_value(assessment).unwrap_or(Value::Null);
    if let Value::Object(fields) = &mut value {
        fields.insert(
            "score".to_string(),
            json!(risk_score(assessment.severity, assessment.likelihood)),
        );
        fields.insert("level".to_string(), json!(level));
        fields.insert("level_label".to_string(), json!(level.label()));
        fields.insert("level_color".to_string(), json!(level.css_color()));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use baret_model::AssessmentStatus;
    use chrono::{TimeZone, Utc};

    #[test]
    fn listing_rows_carry_the_derived_level() {
        let assessment = RiskAssessment::new(
            7,
            "Yüksekte çalışma".to_string(),
            None,
            None,
            Some("Çatı".to_string()),
            Some(5),
            Some(4),
            AssessmentStatus::Active,
            Utc.with_ymd_and_hms(2024, 3, 12, 10, 0, 0).unwrap(),
            None,
        );
        let value = assessment_with_level(&assessment);
        assert_eq!(value["score"], 20);
        assert_eq!(value["level"], "CRITICAL");
        assert_eq!(value["level_label"], "Çok Yüksek");
        assert_eq!(value["level_color"], "#ff0000");
        assert_eq!(value["title"], "Yüksekte çalışma");
    }

    #[test]
    fn absent_ratings_fall_back_to_the_default_band() {
        let assessment = RiskAssessment::new(
            8,
            "Gürültü ölçümü".to_string(),
            None,
            None,
            None,
            None,
            None,
            AssessmentStatus::Draft,
            Utc.with_ymd_and_hms(2024, 3, 12, 10, 0, 0).unwrap(),
            None,
        );
        let value = assessment_with_level(&assessment);
        assert_eq!(value["score"], 9);
        assert_eq!(value["level"], "MEDIUM");
    }
}
