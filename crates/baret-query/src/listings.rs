// SPDX-License-Identifier: Apache-2.0

use crate::filters::{AssessmentFilter, IncidentFilter, QueryLimits};
use crate::{rows, QueryError};
use baret_model::{Incident, RiskAssessment, TallyKey};
use rusqlite::{params_from_iter, types::Value, Connection};

const INCIDENT_COLUMNS: &str =
    "id, title, description, department, location, severity, status, occurred_at, reported_by";
const ASSESSMENT_COLUMNS: &str = "id, title, description, department, location, severity, \
     likelihood, status, created_at, assessed_by";

pub fn list_incidents(
    conn: &Connection,
    filter: &IncidentFilter,
    limits: &QueryLimits,
) -> Result<Vec<Incident>, QueryError> {
    filter.validate(limits)?;

    let mut sql = format!("SELECT {INCIDENT_COLUMNS} FROM incidents");
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(status) = filter.status {
        where_parts.push("status = ?".to_string());
        params.push(Value::Text(status.token().to_string()));
    }
    if let Some(severity) = filter.severity {
        where_parts.push("severity = ?".to_string());
        params.push(Value::Text(severity.token().to_string()));
    }
    if let Some(department) = &filter.department {
        where_parts.push("department = ?".to_string());
        params.push(Value::Text(department.as_str().to_string()));
    }
    if let Some(from) = filter.from {
        where_parts.push("date(occurred_at) >= ?".to_string());
        params.push(Value::Text(from.to_string()));
    }
    if let Some(to) = filter.to {
        where_parts.push("date(occurred_at) <= ?".to_string());
        params.push(Value::Text(to.to_string()));
    }

    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }
    sql.push_str(" ORDER BY occurred_at DESC, id DESC LIMIT ?");
    params.push(Value::Integer(filter.limit as i64));

    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt.query_map(params_from_iter(params.iter()), rows::incident_from_row)?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

pub fn list_assessments(
    conn: &Connection,
    filter: &AssessmentFilter,
    limits: &QueryLimits,
) -> Result<Vec<RiskAssessment>, QueryError> {
    filter.validate(limits)?;

    let mut sql = format!("SELECT {ASSESSMENT_COLUMNS} FROM risk_assessments");
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(department) = &filter.department {
        where_parts.push("department = ?".to_string());
        params.push(Value::Text(department.as_str().to_string()));
    }
    if let Some(status) = filter.status {
        where_parts.push("status = ?".to_string());
        params.push(Value::Text(status.token().to_string()));
    }

    if !where_parts.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ?");
    params.push(Value::Integer(filter.limit as i64));

    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt.query_map(params_from_iter(params.iter()), rows::assessment_from_row)?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

/// Full export listing, newest first, capped by `max_export_rows`.
pub fn export_assessments(
    conn: &Connection,
    limits: &QueryLimits,
) -> Result<Vec<RiskAssessment>, QueryError> {
    let sql = format!(
        "SELECT {ASSESSMENT_COLUMNS} FROM risk_assessments ORDER BY created_at DESC, id DESC \
         LIMIT ?"
    );
    let mut stmt = conn.prepare(&sql)?;
    let mapped = stmt.query_map(
        [Value::Integer(limits.max_export_rows as i64)],
        rows::assessment_from_row,
    )?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}
