// SPDX-License-Identifier: Apache-2.0

use crate::QueryError;
use baret_model::{IncidentStatus, TallyKey};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ToSql};

/// Raw grouped-count rows; token recognition happens in the tally layer.
fn grouped(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<(String, i64)>, QueryError> {
    let mut stmt = conn.prepare(sql)?;
    let mapped = stmt.query_map(params, |row| Ok((row.get(0)?, row.get(1)?)))?;
    mapped
        .collect::<Result<Vec<_>, _>>()
        .map_err(QueryError::from)
}

pub fn incident_status_counts(
    conn: &Connection,
    since: DateTime<Utc>,
) -> Result<Vec<(String, i64)>, QueryError> {
    grouped(
        conn,
        "SELECT status, COUNT(*) FROM incidents WHERE occurred_at >= ?1 GROUP BY status",
        params![since],
    )
}

pub fn incident_severity_counts(
    conn: &Connection,
    since: DateTime<Utc>,
) -> Result<Vec<(String, i64)>, QueryError> {
    grouped(
        conn,
        "SELECT severity, COUNT(*) FROM incidents WHERE occurred_at >= ?1 GROUP BY severity",
        params![since],
    )
}

pub fn training_status_counts(
    conn: &Connection,
    since: DateTime<Utc>,
) -> Result<Vec<(String, i64)>, QueryError> {
    grouped(
        conn,
        "SELECT status, COUNT(*) FROM trainings WHERE start_date >= ?1 GROUP BY status",
        params![since.date_naive()],
    )
}

pub fn audit_status_counts(
    conn: &Connection,
    since: DateTime<Utc>,
) -> Result<Vec<(String, i64)>, QueryError> {
    grouped(
        conn,
        "SELECT status, COUNT(*) FROM audits WHERE audit_date >= ?1 GROUP BY status",
        params![since.date_naive()],
    )
}

/// Raw severity/likelihood pairs; the level split is always recomputed from
/// these, never read from a stored column.
pub fn assessment_ratings(
    conn: &Connection,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<(Option<i32>, Option<i32>)>, QueryError> {
    let decode = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(Option<i32>, Option<i32>)> {
        Ok((row.get(0)?, row.get(1)?))
    };
    let mut rows = Vec::new();
    match since {
        Some(start) => {
            let mut stmt = conn
                .prepare("SELECT severity, likelihood FROM risk_assessments WHERE created_at >= ?1")?;
            let mapped = stmt.query_map(params![start], decode)?;
            for row in mapped {
                rows.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT severity, likelihood FROM risk_assessments")?;
            let mapped = stmt.query_map([], decode)?;
            for row in mapped {
                rows.push(row?);
            }
        }
    }
    Ok(rows)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleCounts {
    pub incidents: i64,
    pub risk_assessments: i64,
    pub audits: i64,
    pub trainings: i64,
    pub equipment: i64,
    pub tasks: i64,
}

pub fn module_counts(conn: &Connection) -> Result<ModuleCounts, QueryError> {
    Ok(ModuleCounts {
        incidents: table_count(conn, "incidents")?,
        risk_assessments: table_count(conn, "risk_assessments")?,
        audits: table_count(conn, "audits")?,
        trainings: table_count(conn, "trainings")?,
        equipment: table_count(conn, "equipment")?,
        tasks: table_count(conn, "tasks")?,
    })
}

pub fn open_incident_count(conn: &Connection) -> Result<i64, QueryError> {
    conn.query_row(
        "SELECT COUNT(*) FROM incidents WHERE status = ?1",
        params![IncidentStatus::Open.token()],
        |row| row.get(0),
    )
    .map_err(QueryError::from)
}

fn table_count(conn: &Connection, table: &str) -> Result<i64, QueryError> {
    // callers pass fixed table names only
    let sql = format!("SELECT COUNT(*) FROM {table}");
    conn.query_row(&sql, [], |row| row.get(0))
        .map_err(QueryError::from)
}
