// SPDX-License-Identifier: Apache-2.0

use crate::QueryError;
use rusqlite::Connection;

const DDL: &str = "
CREATE TABLE IF NOT EXISTS incidents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    department TEXT,
    location TEXT,
    severity TEXT NOT NULL,
    status TEXT NOT NULL,
    occurred_at TEXT NOT NULL,
    reported_by TEXT
);
CREATE INDEX IF NOT EXISTS idx_incidents_occurred_at ON incidents(occurred_at);
CREATE INDEX IF NOT EXISTS idx_incidents_status ON incidents(status);

CREATE TABLE IF NOT EXISTS risk_assessments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    department TEXT,
    location TEXT,
    severity INTEGER,
    likelihood INTEGER,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    assessed_by TEXT
);
CREATE INDEX IF NOT EXISTS idx_risk_assessments_created_at ON risk_assessments(created_at);

CREATE TABLE IF NOT EXISTS audits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    department TEXT,
    status TEXT NOT NULL,
    audit_date TEXT NOT NULL,
    auditor TEXT
);
CREATE INDEX IF NOT EXISTS idx_audits_audit_date ON audits(audit_date);

CREATE TABLE IF NOT EXISTS trainings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    department TEXT,
    status TEXT NOT NULL,
    start_date TEXT NOT NULL,
    trainer TEXT
);
CREATE INDEX IF NOT EXISTS idx_trainings_start_date ON trainings(start_date);

CREATE TABLE IF NOT EXISTS equipment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    department TEXT,
    status TEXT NOT NULL,
    location TEXT,
    next_maintenance TEXT
);
CREATE INDEX IF NOT EXISTS idx_equipment_next_maintenance ON equipment(next_maintenance);

CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    status TEXT NOT NULL,
    due_date TEXT NOT NULL,
    assigned_to TEXT
);
CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks(due_date);
";

/// Idempotent schema bootstrap; safe to run on every startup.
pub fn ensure_schema(conn: &Connection) -> Result<(), QueryError> {
    conn.execute_batch(DDL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
                 ('incidents', 'risk_assessments', 'audits', 'trainings', 'equipment', 'tasks')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 6);
    }
}
