#![forbid(unsafe_code)]
//! Baret domain model SSOT.

mod department;
mod records;
mod status;

pub use department::{Department, ParseError, DEPARTMENT_MAX_LEN};
pub use records::{Audit, EquipmentItem, Incident, RiskAssessment, TaskItem, Training};
pub use status::{
    AssessmentStatus, EquipmentStatus, IncidentSeverity, IncidentStatus, Role, ScheduleStatus,
    TallyKey,
};

pub const CRATE_NAME: &str = "baret-model";
