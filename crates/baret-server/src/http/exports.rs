// SPDX-License-Identifier: Apache-2.0
//! Spreadsheet and document downloads of the assessment register.

use super::handlers::{api_error_response, note_query_elapsed, rejected, store_failure};
use crate::middleware::auth::AuthContext;
use crate::AppState;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use baret_api::ApiError;
use baret_export::{render_assessment_document, render_assessment_sheet, ExportArtifact};
use baret_model::Role;
use chrono::Utc;
use std::time::Instant;

#[derive(Clone, Copy)]
enum ExportKind {
    Sheet,
    Document,
}

impl ExportKind {
    const fn metric_token(self) -> &'static str {
        match self {
            Self::Sheet => "xlsx",
            Self::Document => "pdf",
        }
    }
}

pub(crate) async fn export_sheet_handler(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
) -> Response {
    export_response(
        state,
        auth,
        "/v1/export/risk-assessments.xlsx",
        ExportKind::Sheet,
    )
    .await
}

pub(crate) async fn export_document_handler(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
) -> Response {
    export_response(
        state,
        auth,
        "/v1/export/risk-assessments.pdf",
        ExportKind::Document,
    )
    .await
}

/// Downloads are manager territory. Employees can read every listing but
/// never pull the full register as a file.
async fn export_response(
    state: AppState,
    auth: Option<Extension<AuthContext>>,
    route: &'static str,
    kind: ExportKind,
) -> Response {
    let started = Instant::now();

    if state.api.require_auth {
        let role = auth.as_ref().map(|extension| extension.0.role);
        if !matches!(role, Some(Role::Admin | Role::Manager)) {
            let err = ApiError::forbidden("admin|manager");
            return rejected(&state, route, started, err).await;
        }
    }

    let fetch_started = Instant::now();
    let rows = match state.store.export_assessments(&state.limits).await {
        Ok(rows) => rows,
        Err(err) => return store_failure(&state, route, started, &err).await,
    };
    note_query_elapsed(&state, route, fetch_started.elapsed());

    let now = Utc::now();
    let rendered = match kind {
        ExportKind::Sheet => render_assessment_sheet(&rows, now),
        ExportKind::Document => render_assessment_document(&rows, now),
    };
    let artifact = match rendered {
        Ok(artifact) => artifact,
        Err(err) => {
            tracing::error!(route, error = %err, "export rendering failed");
            let response =
                api_error_response(StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal());
            state
                .metrics
                .observe_request(route, StatusCode::INTERNAL_SERVER_ERROR, started.elapsed())
                .await;
            return response;
        }
    };

    state
        .metrics
        .observe_export(kind.metric_token(), artifact.len())
        .await;
    let response = attachment_response(artifact);
    state
        .metrics
        .observe_request(route, StatusCode::OK, started.elapsed())
        .await;
    response
}

fn attachment_response(artifact: ExportArtifact) -> Response {
    let ExportArtifact {
        filename,
        content_type,
        bytes,
    } = artifact;
    let mut response = (StatusCode::OK, bytes).into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(content_type) {
        headers.insert("content-type", value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\"")) {
        headers.insert("content-disposition", value);
    }
    response
}
