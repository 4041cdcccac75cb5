// SPDX-License-Identifier: Apache-2.0

use super::{RecordStore, StoreError};
use async_trait::async_trait;
use baret_model::{Audit, EquipmentItem, Incident, RiskAssessment, TaskItem, Training};
use baret_query::{AssessmentFilter, IncidentFilter, ModuleCounts, QueryLimits};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use std::path::Path;
use tokio::sync::Mutex;

/// SQLite-backed store. `rusqlite::Connection` is not `Sync`, so a single
/// async mutex serializes statement execution across requests.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|err| StoreError(err.to_string()))?;
        baret_query::ensure_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|err| StoreError(err.to_string()))?;
        baret_query::ensure_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs seeding or maintenance work directly on the connection.
    pub async fn with_conn<T>(&self, work: impl FnOnce(&Connection) -> T) -> T {
        let conn = self.conn.lock().await;
        work(&conn)
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map(|_| ())
            .map_err(|err| StoreError(err.to_string()))
    }

    async fn module_counts(&self) -> Result<ModuleCounts, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::module_counts(&conn).map_err(StoreError::from)
    }

    async fn open_incident_count(&self) -> Result<i64, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::open_incident_count(&conn).map_err(StoreError::from)
    }

    async fn incident_status_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::incident_status_counts(&conn, since).map_err(StoreError::from)
    }

    async fn incident_severity_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::incident_severity_counts(&conn, since).map_err(StoreError::from)
    }

    async fn training_status_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::training_status_counts(&conn, since).map_err(StoreError::from)
    }

    async fn audit_status_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::audit_status_counts(&conn, since).map_err(StoreError::from)
    }

    async fn assessment_ratings(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<(Option<i32>, Option<i32>)>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::assessment_ratings(&conn, since).map_err(StoreError::from)
    }

    async fn incident_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::incident_dates_since(&conn, since).map_err(StoreError::from)
    }

    async fn assessment_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::assessment_dates_since(&conn, since).map_err(StoreError::from)
    }

    async fn training_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::training_dates_since(&conn, since).map_err(StoreError::from)
    }

    async fn audit_dates_since(&self, since: DateTime<Utc>) -> Result<Vec<NaiveDate>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::audit_dates_since(&conn, since).map_err(StoreError::from)
    }

    async fn tasks_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TaskItem>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::tasks_between(&conn, start, end).map_err(StoreError::from)
    }

    async fn trainings_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Training>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::trainings_between(&conn, start, end).map_err(StoreError::from)
    }

    async fn audits_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Audit>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::audits_between(&conn, start, end).map_err(StoreError::from)
    }

    async fn equipment_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EquipmentItem>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::equipment_between(&conn, start, end).map_err(StoreError::from)
    }

    async fn list_incidents(
        &self,
        filter: &IncidentFilter,
        limits: &QueryLimits,
    ) -> Result<Vec<Incident>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::list_incidents(&conn, filter, limits).map_err(StoreError::from)
    }

    async fn list_assessments(
        &self,
        filter: &AssessmentFilter,
        limits: &QueryLimits,
    ) -> Result<Vec<RiskAssessment>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::list_assessments(&conn, filter, limits).map_err(StoreError::from)
    }

    async fn export_assessments(
        &self,
        limits: &QueryLimits,
    ) -> Result<Vec<RiskAssessment>, StoreError> {
        let conn = self.conn.lock().await;
        baret_query::export_assessments(&conn, limits).map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baret_model::{IncidentSeverity, IncidentStatus};
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn file_backed_store_round_trips_incidents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteStore::open(&dir.path().join("records.sqlite")).expect("open store");
        store.ping().await.expect("ping");

        store
            .with_conn(|conn| {
                let incident = Incident::new(
                    1,
                    "Forklift çarpması".to_string(),
                    None,
                    None,
                    Some("Depo".to_string()),
                    IncidentSeverity::High,
                    IncidentStatus::Open,
                    at(2024, 3, 5),
                    Some("saha.uzmani".to_string()),
                );
                baret_query::insert_incident(conn, &incident)
            })
            .await
            .expect("insert incident");

        let limits = QueryLimits::default();
        let listed = store
            .list_incidents(&IncidentFilter::default(), &limits)
            .await
            .expect("list incidents");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Forklift çarpması");
        assert_eq!(store.open_incident_count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn reopening_the_same_file_keeps_the_schema_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("records.sqlite");
        drop(SqliteStore::open(&path).expect("first open"));
        let store = SqliteStore::open(&path).expect("second open");
        let counts = store.module_counts().await.expect("module counts");
        assert_eq!(counts.incidents, 0);
        assert_eq!(counts.tasks, 0);
    }
}
