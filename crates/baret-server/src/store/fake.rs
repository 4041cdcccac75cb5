// SPDX-License-Identifier: Apache-2.0

use super::{RecordStore, StoreError};
use async_trait::async_trait;
use baret_model::{
    Audit, EquipmentItem, Incident, IncidentStatus, RiskAssessment, TallyKey, TaskItem, Training,
};
use baret_query::{AssessmentFilter, IncidentFilter, ModuleCounts, QueryLimits};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// In-memory store for handler tests. Fields are public so tests seed
/// vectors directly; the read methods mirror the SQL ordering and range
/// semantics of the real backend.
pub struct FakeStore {
    pub incidents: Mutex<Vec<Incident>>,
    pub assessments: Mutex<Vec<RiskAssessment>>,
    pub trainings: Mutex<Vec<Training>>,
    pub audits: Mutex<Vec<Audit>>,
    pub equipment: Mutex<Vec<EquipmentItem>>,
    pub tasks: Mutex<Vec<TaskItem>>,
    /// Drives `ping`; flip to false to take readiness down.
    pub healthy: AtomicBool,
    /// When set, every read fails, exercising the aggregation error paths.
    pub fail_reads: AtomicBool,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            incidents: Mutex::new(Vec::new()),
            assessments: Mutex::new(Vec::new()),
            trainings: Mutex::new(Vec::new()),
            audits: Mutex::new(Vec::new()),
            equipment: Mutex::new(Vec::new()),
            tasks: Mutex::new(Vec::new()),
            healthy: AtomicBool::new(true),
            fail_reads: AtomicBool::new(false),
        }
    }
}

impl FakeStore {
    fn check(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError("fake store read failure".to_string()));
        }
        Ok(())
    }
}

fn group_tokens(tokens: impl Iterator<Item = &'static str>) -> Vec<(String, i64)> {
    let mut grouped: BTreeMap<String, i64> = BTreeMap::new();
    for token in tokens {
        *grouped.entry(token.to_string()).or_insert(0) += 1;
    }
    grouped.into_iter().collect()
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn ping(&self) -> Result<(), StoreError> {
        if self.healthy.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(StoreError("fake store marked unhealthy".to_string()))
        }
    }

    async fn module_counts(&self) -> Result<ModuleCounts, StoreError> {
        self.check()?;
        Ok(ModuleCounts {
            incidents: self.incidents.lock().await.len() as i64,
            risk_assessments: self.assessments.lock().await.len() as i64,
            audits: self.audits.lock().await.len() as i64,
            trainings: self.trainings.lock().await.len() as i64,
            equipment: self.equipment.lock().await.len() as i64,
            tasks: self.tasks.lock().await.len() as i64,
        })
    }

    async fn open_incident_count(&self) -> Result<i64, StoreError> {
        self.check()?;
        let incidents = self.incidents.lock().await;
        Ok(incidents
            .iter()
            .filter(|incident| incident.status == IncidentStatus::Open)
            .count() as i64)
    }

    async fn incident_status_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        self.check()?;
        let incidents = self.incidents.lock().await;
        Ok(group_tokens(
            incidents
                .iter()
                .filter(|incident| incident.occurred_at >= since)
                .map(|incident| incident.status.token()),
        ))
    }

    async fn incident_severity_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        self.check()?;
        let incidents = self.incidents.lock().await;
        Ok(group_tokens(
            incidents
                .iter()
                .filter(|incident| incident.occurred_at >= since)
                .map(|incident| incident.severity.token()),
        ))
    }

    async fn training_status_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        self.check()?;
        let trainings = self.trainings.lock().await;
        Ok(group_tokens(
            trainings
                .iter()
                .filter(|training| training.start_date >= since.date_naive())
                .map(|training| training.status.token()),
        ))
    }

    async fn audit_status_counts(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        self.check()?;
        let audits = self.audits.lock().await;
        Ok(group_tokens(
            audits
                .iter()
                .filter(|audit| audit.audit_date >= since.date_naive())
                .map(|audit| audit.status.token()),
        ))
    }

    async fn assessment_ratings(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<(Option<i32>, Option<i32>)>, StoreError> {
        self.check()?;
        let assessments = self.assessments.lock().await;
        Ok(assessments
            .iter()
            .filter(|assessment| since.map_or(true, |start| assessment.created_at >= start))
            .map(|assessment| (assessment.severity, assessment.likelihood))
            .collect())
    }

    async fn incident_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, StoreError> {
        self.check()?;
        let incidents = self.incidents.lock().await;
        Ok(incidents
            .iter()
            .filter(|incident| incident.occurred_at >= since)
            .map(|incident| incident.occurred_at.date_naive())
            .collect())
    }

    async fn assessment_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, StoreError> {
        self.check()?;
        let assessments = self.assessments.lock().await;
        Ok(assessments
            .iter()
            .filter(|assessment| assessment.created_at >= since)
            .map(|assessment| assessment.created_at.date_naive())
            .collect())
    }

    async fn training_dates_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, StoreError> {
        self.check()?;
        let trainings = self.trainings.lock().await;
        Ok(trainings
            .iter()
            .filter(|training| training.start_date >= since.date_naive())
            .map(|training| training.start_date)
            .collect())
    }

    async fn audit_dates_since(&self, since: DateTime<Utc>) -> Result<Vec<NaiveDate>, StoreError> {
        self.check()?;
        let audits = self.audits.lock().await;
        Ok(audits
            .iter()
            .filter(|audit| audit.audit_date >= since.date_naive())
            .map(|audit| audit.audit_date)
            .collect())
    }

    async fn tasks_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TaskItem>, StoreError> {
        self.check()?;
        let tasks = self.tasks.lock().await;
        let mut rows: Vec<TaskItem> = tasks
            .iter()
            .filter(|task| task.due_date >= start && task.due_date <= end)
            .cloned()
            .collect();
        rows.sort_by_key(|task| (task.due_date, task.id));
        Ok(rows)
    }

    async fn trainings_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Training>, StoreError> {
        self.check()?;
        let trainings = self.trainings.lock().await;
        let mut rows: Vec<Training> = trainings
            .iter()
            .filter(|training| training.start_date >= start && training.start_date <= end)
            .cloned()
            .collect();
        rows.sort_by_key(|training| (training.start_date, training.id));
        Ok(rows)
    }

    async fn audits_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Audit>, StoreError> {
        self.check()?;
        let audits = self.audits.lock().await;
        let mut rows: Vec<Audit> = audits
            .iter()
            .filter(|audit| audit.audit_date >= start && audit.audit_date <= end)
            .cloned()
            .collect();
        rows.sort_by_key(|audit| (audit.audit_date, audit.id));
        Ok(rows)
    }

    async fn equipment_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EquipmentItem>, StoreError> {
        self.check()?;
        let equipment = self.equipment.lock().await;
        let mut rows: Vec<EquipmentItem> = equipment
            .iter()
            .filter(|item| {
                item.next_maintenance
                    .is_some_and(|date| date >= start && date <= end)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|item| (item.next_maintenance, item.id));
        Ok(rows)
    }

    async fn list_incidents(
        &self,
        filter: &IncidentFilter,
        limits: &QueryLimits,
    ) -> Result<Vec<Incident>, StoreError> {
        self.check()?;
        filter.validate(limits)?;
        let incidents = self.incidents.lock().await;
        let mut rows: Vec<Incident> = incidents
            .iter()
            .filter(|incident| {
                filter.status.map_or(true, |status| incident.status == status)
                    && filter
                        .severity
                        .map_or(true, |severity| incident.severity == severity)
                    && filter
                        .department
                        .as_ref()
                        .map_or(true, |dept| incident.department.as_ref() == Some(dept))
                    && filter
                        .from
                        .map_or(true, |from| incident.occurred_at.date_naive() >= from)
                    && filter
                        .to
                        .map_or(true, |to| incident.occurred_at.date_naive() <= to)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
        rows.truncate(filter.limit);
        Ok(rows)
    }

    async fn list_assessments(
        &self,
        filter: &AssessmentFilter,
        limits: &QueryLimits,
    ) -> Result<Vec<RiskAssessment>, StoreError> {
        self.check()?;
        filter.validate(limits)?;
        let assessments = self.assessments.lock().await;
        let mut rows: Vec<RiskAssessment> = assessments
            .iter()
            .filter(|assessment| {
                filter
                    .department
                    .as_ref()
                    .map_or(true, |dept| assessment.department.as_ref() == Some(dept))
                    && filter
                        .status
                        .map_or(true, |status| assessment.status == status)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.truncate(filter.limit);
        Ok(rows)
    }

    async fn export_assessments(
        &self,
        limits: &QueryLimits,
    ) -> Result<Vec<RiskAssessment>, StoreError> {
        self.check()?;
        let assessments = self.assessments.lock().await;
        let mut rows = assessments.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.truncate(limits.max_export_rows);
        Ok(rows)
    }
}
