// SPDX-License-Identifier: Apache-2.0

use crate::QueryError;
use baret_model::{AssessmentStatus, Department, IncidentSeverity, IncidentStatus};
use chrono::NaiveDate;

pub const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_limit: usize,
    pub max_export_rows: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_limit: 500,
            max_export_rows: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentFilter {
    pub status: Option<IncidentStatus>,
    pub severity: Option<IncidentSeverity>,
    pub department: Option<Department>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: usize,
}

impl Default for IncidentFilter {
    fn default() -> Self {
        Self {
            status: None,
            severity: None,
            department: None,
            from: None,
            to: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl IncidentFilter {
    pub fn validate(&self, limits: &QueryLimits) -> Result<(), QueryError> {
        validate_limit(self.limit, limits)?;
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(QueryError("date range start exceeds end".to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentFilter {
    pub department: Option<Department>,
    pub status: Option<AssessmentStatus>,
    pub limit: usize,
}

impl Default for AssessmentFilter {
    fn default() -> Self {
        Self {
            department: None,
            status: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl AssessmentFilter {
    pub fn validate(&self, limits: &QueryLimits) -> Result<(), QueryError> {
        validate_limit(self.limit, limits)
    }
}

fn validate_limit(limit: usize, limits: &QueryLimits) -> Result<(), QueryError> {
    if limit == 0 || limit > limits.max_limit {
        return Err(QueryError(format!(
            "limit must be between 1 and {}",
            limits.max_limit
        )));
    }
    Ok(())
}
