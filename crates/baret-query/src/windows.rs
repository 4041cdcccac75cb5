// SPDX-License-Identifier: Apache-2.0

use crate::{rows, QueryError};
use baret_model::{Audit, EquipmentItem, TaskItem, Training};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};

/// Occurrence dates for the monthly histogram, `[start, now)` with no end
/// bound applied here.
pub fn incident_dates_since(
    conn: &Connection,
    start: DateTime<Utc>,
) -> Result<Vec<NaiveDate>, QueryError> {
    let mut stmt = conn.prepare("SELECT date(occurred_at) FROM incidents WHERE occurred_at >= ?1")?;
    let mapped = stmt.query_map(params![start], |row| row.get(0))?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

pub fn assessment_dates_since(
    conn: &Connection,
    start: DateTime<Utc>,
) -> Result<Vec<NaiveDate>, QueryError> {
    let mut stmt =
        conn.prepare("SELECT date(created_at) FROM risk_assessments WHERE created_at >= ?1")?;
    let mapped = stmt.query_map(params![start], |row| row.get(0))?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

pub fn training_dates_since(
    conn: &Connection,
    start: DateTime<Utc>,
) -> Result<Vec<NaiveDate>, QueryError> {
    let mut stmt = conn.prepare("SELECT start_date FROM trainings WHERE start_date >= ?1")?;
    let mapped = stmt.query_map(params![start.date_naive()], |row| row.get(0))?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

pub fn audit_dates_since(
    conn: &Connection,
    start: DateTime<Utc>,
) -> Result<Vec<NaiveDate>, QueryError> {
    let mut stmt = conn.prepare("SELECT audit_date FROM audits WHERE audit_date >= ?1")?;
    let mapped = stmt.query_map(params![start.date_naive()], |row| row.get(0))?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

/// Calendar source fetches over an inclusive day range. A NULL
/// `next_maintenance` never satisfies the range predicate, so unscheduled
/// equipment stays out of the feed.
pub fn tasks_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<TaskItem>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, status, due_date, assigned_to FROM tasks \
         WHERE due_date >= ?1 AND due_date <= ?2 ORDER BY due_date ASC, id ASC",
    )?;
    let mapped = stmt.query_map(params![start, end], rows::task_from_row)?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

pub fn trainings_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Training>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, department, status, start_date, trainer FROM trainings \
         WHERE start_date >= ?1 AND start_date <= ?2 ORDER BY start_date ASC, id ASC",
    )?;
    let mapped = stmt.query_map(params![start, end], rows::training_from_row)?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

pub fn audits_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Audit>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, department, status, audit_date, auditor FROM audits \
         WHERE audit_date >= ?1 AND audit_date <= ?2 ORDER BY audit_date ASC, id ASC",
    )?;
    let mapped = stmt.query_map(params![start, end], rows::audit_from_row)?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

pub fn equipment_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<EquipmentItem>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, department, status, location, next_maintenance FROM equipment \
         WHERE next_maintenance >= ?1 AND next_maintenance <= ?2 \
         ORDER BY next_maintenance ASC, id ASC",
    )?;
    let mapped = stmt.query_map(params![start, end], rows::equipment_from_row)?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}
