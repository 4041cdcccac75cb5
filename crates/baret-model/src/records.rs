// SPDX-License-Identifier: Apache-2.0

use crate::department::Department;
use crate::status::{
    AssessmentStatus, EquipmentStatus, IncidentSeverity, IncidentStatus, ScheduleStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Incident {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub department: Option<Department>,
    pub location: Option<String>,
    pub severity: IncidentSeverity,
    pub status: IncidentStatus,
    pub occurred_at: DateTime<Utc>,
    pub reported_by: Option<String>,
}

impl Incident {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: i64,
        title: String,
        description: Option<String>,
        department: Option<Department>,
        location: Option<String>,
        severity: IncidentSeverity,
        status: IncidentStatus,
        occurred_at: DateTime<Utc>,
        reported_by: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            department,
            location,
            severity,
            status,
            occurred_at,
            reported_by,
        }
    }
}

/// A risk assessment stores raw severity and likelihood only; the derived
/// level is recomputed at every read and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct RiskAssessment {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub department: Option<Department>,
    pub location: Option<String>,
    pub severity: Option<i32>,
    pub likelihood: Option<i32>,
    pub status: AssessmentStatus,
    pub created_at: DateTime<Utc>,
    pub assessed_by: Option<String>,
}

impl RiskAssessment {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: i64,
        title: String,
        description: Option<String>,
        department: Option<Department>,
        location: Option<String>,
        severity: Option<i32>,
        likelihood: Option<i32>,
        status: AssessmentStatus,
        created_at: DateTime<Utc>,
        assessed_by: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            department,
            location,
            severity,
            likelihood,
            status,
            created_at,
            assessed_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Audit {
    pub id: i64,
    pub title: String,
    pub department: Option<Department>,
    pub status: ScheduleStatus,
    pub audit_date: NaiveDate,
    pub auditor: Option<String>,
}

impl Audit {
    #[must_use]
    pub fn new(
        id: i64,
        title: String,
        department: Option<Department>,
        status: ScheduleStatus,
        audit_date: NaiveDate,
        auditor: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            department,
            status,
            audit_date,
            auditor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct Training {
    pub id: i64,
    pub title: String,
    pub department: Option<Department>,
    pub status: ScheduleStatus,
    pub start_date: NaiveDate,
    pub trainer: Option<String>,
}

impl Training {
    #[must_use]
    pub fn new(
        id: i64,
        title: String,
        department: Option<Department>,
        status: ScheduleStatus,
        start_date: NaiveDate,
        trainer: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            department,
            status,
            start_date,
            trainer,
        }
    }
}

/// `next_maintenance` stays optional: unscheduled equipment is a legal state
/// and a null date can never match a calendar range filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct EquipmentItem {
    pub id: i64,
    pub name: String,
    pub department: Option<Department>,
    pub status: EquipmentStatus,
    pub location: Option<String>,
    pub next_maintenance: Option<NaiveDate>,
}

impl EquipmentItem {
    #[must_use]
    pub fn new(
        id: i64,
        name: String,
        department: Option<Department>,
        status: EquipmentStatus,
        location: Option<String>,
        next_maintenance: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            department,
            status,
            location,
            next_maintenance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub status: ScheduleStatus,
    pub due_date: NaiveDate,
    pub assigned_to: Option<String>,
}

impl TaskItem {
    #[must_use]
    pub fn new(
        id: i64,
        title: String,
        status: ScheduleStatus,
        due_date: NaiveDate,
        assigned_to: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            status,
            due_date,
            assigned_to,
        }
    }
}
