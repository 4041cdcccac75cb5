// SPDX-License-Identifier: Apache-2.0

//! Row decoders shared by the listing and window queries. Column order is
//! fixed by the SELECT lists in the callers.

use baret_model::{
    AssessmentStatus, Audit, Department, EquipmentItem, EquipmentStatus, Incident,
    IncidentSeverity, IncidentStatus, ParseError, RiskAssessment, ScheduleStatus, TaskItem,
    Training,
};
use rusqlite::{types::Type, Error, Result, Row};

fn conversion_error(index: usize, err: ParseError) -> Error {
    Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

fn department_at(row: &Row<'_>, index: usize) -> Result<Option<Department>> {
    match row.get::<_, Option<String>>(index)? {
        Some(raw) => Department::parse(&raw)
            .map(Some)
            .map_err(|e| conversion_error(index, e)),
        None => Ok(None),
    }
}

pub(crate) fn incident_from_row(row: &Row<'_>) -> Result<Incident> {
    let severity_raw: String = row.get(5)?;
    let status_raw: String = row.get(6)?;
    Ok(Incident::new(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        department_at(row, 3)?,
        row.get(4)?,
        IncidentSeverity::parse(&severity_raw).map_err(|e| conversion_error(5, e))?,
        IncidentStatus::parse(&status_raw).map_err(|e| conversion_error(6, e))?,
        row.get(7)?,
        row.get(8)?,
    ))
}

pub(crate) fn assessment_from_row(row: &Row<'_>) -> Result<RiskAssessment> {
    let status_raw: String = row.get(7)?;
    Ok(RiskAssessment::new(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        department_at(row, 3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        AssessmentStatus::parse(&status_raw).map_err(|e| conversion_error(7, e))?,
        row.get(8)?,
        row.get(9)?,
    ))
}

pub(crate) fn audit_from_row(row: &Row<'_>) -> Result<Audit> {
    let status_raw: String = row.get(3)?;
    Ok(Audit::new(
        row.get(0)?,
        row.get(1)?,
        department_at(row, 2)?,
        ScheduleStatus::parse(&status_raw).map_err(|e| conversion_error(3, e))?,
        row.get(4)?,
        row.get(5)?,
    ))
}

pub(crate) fn training_from_row(row: &Row<'_>) -> Result<Training> {
    let status_raw: String = row.get(3)?;
    Ok(Training::new(
        row.get(0)?,
        row.get(1)?,
        department_at(row, 2)?,
        ScheduleStatus::parse(&status_raw).map_err(|e| conversion_error(3, e))?,
        row.get(4)?,
        row.get(5)?,
    ))
}

pub(crate) fn equipment_from_row(row: &Row<'_>) -> Result<EquipmentItem> {
    let status_raw: String = row.get(3)?;
    Ok(EquipmentItem::new(
        row.get(0)?,
        row.get(1)?,
        department_at(row, 2)?,
        EquipmentStatus::parse(&status_raw).map_err(|e| conversion_error(3, e))?,
        row.get(4)?,
        row.get(5)?,
    ))
}

pub(crate) fn task_from_row(row: &Row<'_>) -> Result<TaskItem> {
    let status_raw: String = row.get(2)?;
    Ok(TaskItem::new(
        row.get(0)?,
        row.get(1)?,
        ScheduleStatus::parse(&status_raw).map_err(|e| conversion_error(2, e))?,
        row.get(3)?,
        row.get(4)?,
    ))
}
