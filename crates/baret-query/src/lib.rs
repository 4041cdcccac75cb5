#![forbid(unsafe_code)]
//! SQL layer over the single SQLite record store.

mod counts;
mod filters;
mod listings;
mod rows;
mod schema;
mod windows;
mod writes;

pub use counts::{
    assessment_ratings, audit_status_counts, incident_severity_counts, incident_status_counts,
    module_counts, open_incident_count, training_status_counts, ModuleCounts,
};
pub use filters::{AssessmentFilter, IncidentFilter, QueryLimits, DEFAULT_LIMIT};
pub use listings::{export_assessments, list_assessments, list_incidents};
pub use schema::ensure_schema;
pub use windows::{
    assessment_dates_since, audit_dates_since, audits_between, equipment_between,
    incident_dates_since, tasks_between, training_dates_since, trainings_between,
};
pub use writes::{
    insert_assessment, insert_audit, insert_equipment, insert_incident, insert_task,
    insert_training,
};

pub const CRATE_NAME: &str = "baret-query";

#[derive(Debug)]
pub struct QueryError(pub String);

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for QueryError {}

impl From<rusqlite::Error> for QueryError {
    fn from(err: rusqlite::Error) -> Self {
        Self(err.to_string())
    }
}
