// SPDX-License-Identifier: Apache-2.0

//! Insert paths for seeding and ingest; the record's own `id` is ignored and
//! the assigned rowid is returned.

use crate::QueryError;
use baret_model::{
    Audit, EquipmentItem, Incident, RiskAssessment, TallyKey, TaskItem, Training,
};
use rusqlite::{params, Connection};

pub fn insert_incident(conn: &Connection, incident: &Incident) -> Result<i64, QueryError> {
    conn.execute(
        "INSERT INTO incidents (title, description, department, location, severity, status, \
         occurred_at, reported_by) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            incident.title,
            incident.description,
            incident.department.as_ref().map(|d| d.as_str()),
            incident.location,
            incident.severity.token(),
            incident.status.token(),
            incident.occurred_at,
            incident.reported_by,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_assessment(
    conn: &Connection,
    assessment: &RiskAssessment,
) -> Result<i64, QueryError> {
    conn.execute(
        "INSERT INTO risk_assessments (title, description, department, location, severity, \
         likelihood, status, created_at, assessed_by) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            assessment.title,
            assessment.description,
            assessment.department.as_ref().map(|d| d.as_str()),
            assessment.location,
            assessment.severity,
            assessment.likelihood,
            assessment.status.token(),
            assessment.created_at,
            assessment.assessed_by,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_audit(conn: &Connection, audit: &Audit) -> Result<i64, QueryError> {
    conn.execute(
        "INSERT INTO audits (title, department, status, audit_date, auditor) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            audit.title,
            audit.department.as_ref().map(|d| d.as_str()),
            audit.status.token(),
            audit.audit_date,
            audit.auditor,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_training(conn: &Connection, training: &Training) -> Result<i64, QueryError> {
    conn.execute(
        "INSERT INTO trainings (title, department, status, start_date, trainer) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            training.title,
            training.department.as_ref().map(|d| d.as_str()),
            training.status.token(),
            training.start_date,
            training.trainer,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_equipment(conn: &Connection, item: &EquipmentItem) -> Result<i64, QueryError> {
    conn.execute(
        "INSERT INTO equipment (name, department, status, location, next_maintenance) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            item.name,
            item.department.as_ref().map(|d| d.as_str()),
            item.status.token(),
            item.location,
            item.next_maintenance,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_task(conn: &Connection, task: &TaskItem) -> Result<i64, QueryError> {
    conn.execute(
        "INSERT INTO tasks (title, status, due_date, assigned_to) VALUES (?1, ?2, ?3, ?4)",
        params![
            task.title,
            task.status.token(),
            task.due_date,
            task.assigned_to,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
