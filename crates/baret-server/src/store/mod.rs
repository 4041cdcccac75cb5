// SPDX-License-Identifier: Apache-2.0
//! Persistence seam between the handlers and the record tables.
//!
//! Handlers only ever see [`RecordStore`]; the production backend wraps a
//! SQLite connection and the fake serves vectors for handler tests.

pub(crate) mod fake;
pub(crate) mod sqlite;

use async_trait::async_trait;
use baret_model::{Audit, EquipmentItem, Incident, RiskAssessment, TaskItem, Training};
use baret_query::{AssessmentFilter, IncidentFilter, ModuleCounts, QueryError, QueryLimits};
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<QueryError> for StoreError {
    fn from(err: QueryError) -> Self {
        Self(err.0)
    }
}

/// Read surface consumed by the HTTP layer. Every method is a plain read;
/// ingest goes through `baret_query` writes on the underlying connection.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Cheap liveness probe against the backing storage.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn module_counts(&self) -> Result<ModuleCounts, StoreError>;
    async fn open_incident_count(&self) -> Result<i64, StoreError>;

    async fn incident_status_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError>;
    async fn incident_severity_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError>;
    async fn training_status_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError>;
    async fn audit_status_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError>;
    async fn assessment_ratings(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<(Option<i32>, Option<i32>)>, StoreError>;

    async fn incident_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, StoreError>;
    async fn assessment_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, StoreError>;
    async fn training_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, StoreError>;
    async fn audit_dates_since(&self, since: DateTime<Utc>) -> Result<Vec<NaiveDate>, StoreError>;

    async fn tasks_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TaskItem>, StoreError>;
    async fn trainings_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Training>, StoreError>;
    async fn audits_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Audit>, StoreError>;
    async fn equipment_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EquipmentItem>, StoreError>;

    async fn list_incidents(
        &self,
        filter: &IncidentFilter,
        limits: &QueryLimits,
    ) -> Result<Vec<Incident>, StoreError>;
    async fn list_assessments(
        &self,
        filter: &AssessmentFilter,
        limits: &QueryLimits,
    ) -> Result<Vec<RiskAssessment>, StoreError>;
    async fn export_assessments(
        &self,
        limits: &QueryLimits,
    ) -> Result<Vec<RiskAssessment>, StoreError>;
}
