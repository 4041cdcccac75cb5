#![forbid(unsafe_code)]
//! Wire contract shared by the server and its clients: the error taxonomy,
//! the status mapping, and typed query-parameter parsing.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const CRATE_NAME: &str = "baret-api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    Unauthenticated,
    Forbidden,
    NotFound,
    ValidationFailed,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self {
            code: ApiErrorCode::Unauthenticated,
            message: "authentication required".to_string(),
            details: json!({}),
        }
    }

    #[must_use]
    pub fn forbidden(required: &str) -> Self {
        Self {
            code: ApiErrorCode::Forbidden,
            message: "insufficient role".to_string(),
            details: json!({"required": required}),
        }
    }

    #[must_use]
    pub fn not_found(what: &str) -> Self {
        Self {
            code: ApiErrorCode::NotFound,
            message: format!("{what} not found"),
            details: json!({"resource": what}),
        }
    }

    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self {
            code: ApiErrorCode::ValidationFailed,
            message: format!("missing query parameter: {name}"),
            details: json!({"parameter": name}),
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self {
            code: ApiErrorCode::ValidationFailed,
            message: format!("invalid query parameter: {name}"),
            details: json!({"parameter": name, "value": value}),
        }
    }

    /// Catch-all for store and render failures. The caller logs the real
    /// diagnostic; the wire message stays generic.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            code: ApiErrorCode::Internal,
            message: "internal error".to_string(),
            details: json!({}),
        }
    }
}

#[must_use]
pub const fn map_error_status(code: ApiErrorCode) -> u16 {
    match code {
        ApiErrorCode::ValidationFailed => 400,
        ApiErrorCode::Unauthenticated => 401,
        ApiErrorCode::Forbidden => 403,
        ApiErrorCode::NotFound => 404,
        ApiErrorCode::Internal => 500,
    }
}

pub mod params {
    use super::ApiError;
    use baret_core::StatsWindow;
    use baret_model::{AssessmentStatus, Department, IncidentSeverity, IncidentStatus};
    use baret_query::{AssessmentFilter, IncidentFilter, QueryLimits, DEFAULT_LIMIT};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatsParams {
        pub window: StatsWindow,
    }

    /// Window parsing never fails; the token falls back to `month`.
    #[must_use]
    pub fn parse_stats_params(query: &BTreeMap<String, String>) -> StatsParams {
        StatsParams {
            window: StatsWindow::parse_or_default(query.get("window").map(String::as_str)),
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CalendarParams {
        pub start: NaiveDate,
        pub end: NaiveDate,
    }

    pub fn parse_calendar_params(
        query: &BTreeMap<String, String>,
    ) -> Result<CalendarParams, ApiError> {
        let start = require_date(query, "start")?;
        let end = require_date(query, "end")?;
        if start > end {
            return Err(ApiError::invalid_param("end", &end.to_string()));
        }
        Ok(CalendarParams { start, end })
    }

    pub fn parse_incident_list_params(
        query: &BTreeMap<String, String>,
        limits: &QueryLimits,
    ) -> Result<IncidentFilter, ApiError> {
        let status = match query.get("status") {
            Some(raw) => Some(
                IncidentStatus::parse(raw).map_err(|_| ApiError::invalid_param("status", raw))?,
            ),
            None => None,
        };
        let severity = match query.get("severity") {
            Some(raw) => Some(
                IncidentSeverity::parse(raw)
                    .map_err(|_| ApiError::invalid_param("severity", raw))?,
            ),
            None => None,
        };
        let department = parse_department(query)?;
        let from = optional_date(query, "from")?;
        let to = optional_date(query, "to")?;
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ApiError::invalid_param("to", &to.to_string()));
            }
        }
        let limit = parse_limit(query, limits)?;
        Ok(IncidentFilter {
            status,
            severity,
            department,
            from,
            to,
            limit,
        })
    }

    pub fn parse_assessment_list_params(
        query: &BTreeMap<String, String>,
        limits: &QueryLimits,
    ) -> Result<AssessmentFilter, ApiError> {
        let department = parse_department(query)?;
        let status = match query.get("status") {
            Some(raw) => Some(
                AssessmentStatus::parse(raw).map_err(|_| ApiError::invalid_param("status", raw))?,
            ),
            None => None,
        };
        let limit = parse_limit(query, limits)?;
        Ok(AssessmentFilter {
            department,
            status,
            limit,
        })
    }

    fn parse_department(
        query: &BTreeMap<String, String>,
    ) -> Result<Option<Department>, ApiError> {
        match query.get("department") {
            Some(raw) => Department::parse(raw)
                .map(Some)
                .map_err(|_| ApiError::invalid_param("department", raw)),
            None => Ok(None),
        }
    }

    fn parse_limit(
        query: &BTreeMap<String, String>,
        limits: &QueryLimits,
    ) -> Result<usize, ApiError> {
        match query.get("limit") {
            Some(raw) => {
                let value = raw
                    .parse::<usize>()
                    .map_err(|_| ApiError::invalid_param("limit", raw))?;
                if value == 0 || value > limits.max_limit {
                    return Err(ApiError::invalid_param("limit", raw));
                }
                Ok(value)
            }
            None => Ok(DEFAULT_LIMIT),
        }
    }

    fn require_date(query: &BTreeMap<String, String>, name: &str) -> Result<NaiveDate, ApiError> {
        let raw = query
            .get(name)
            .ok_or_else(|| ApiError::missing_param(name))?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ApiError::invalid_param(name, raw))
    }

    fn optional_date(
        query: &BTreeMap<String, String>,
        name: &str,
    ) -> Result<Option<NaiveDate>, ApiError> {
        match query.get(name) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| ApiError::invalid_param(name, raw)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::params::{
        parse_calendar_params, parse_incident_list_params, parse_stats_params,
    };
    use super::{map_error_status, ApiError, ApiErrorCode};
    use baret_core::StatsWindow;
    use baret_model::IncidentStatus;
    use baret_query::QueryLimits;
    use std::collections::BTreeMap;

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn stats_window_token_is_forgiving() {
        assert_eq!(
            parse_stats_params(&query(&[("window", "quarter")])).window,
            StatsWindow::Quarter
        );
        assert_eq!(
            parse_stats_params(&query(&[("window", "decade")])).window,
            StatsWindow::Month
        );
        assert_eq!(parse_stats_params(&query(&[])).window, StatsWindow::Month);
    }

    #[test]
    fn calendar_params_require_both_dates() {
        let err = parse_calendar_params(&query(&[("start", "2024-03-01")])).unwrap_err();
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);

        let parsed =
            parse_calendar_params(&query(&[("start", "2024-03-01"), ("end", "2024-03-31")]))
                .unwrap();
        assert_eq!(parsed.start.to_string(), "2024-03-01");
    }

    #[test]
    fn calendar_params_reject_garbage_and_inverted_ranges() {
        let err = parse_calendar_params(&query(&[("start", "03/01/2024"), ("end", "2024-03-31")]))
            .unwrap_err();
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);

        let err = parse_calendar_params(&query(&[("start", "2024-04-01"), ("end", "2024-03-01")]))
            .unwrap_err();
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);
    }

    #[test]
    fn incident_params_parse_exhaustively() {
        let limits = QueryLimits::default();
        let q = query(&[
            ("status", "OPEN"),
            ("severity", "HIGH"),
            ("department", "Depo"),
            ("from", "2024-01-01"),
            ("to", "2024-03-31"),
            ("limit", "25"),
        ]);
        let filter = parse_incident_list_params(&q, &limits).unwrap();
        assert_eq!(filter.status, Some(IncidentStatus::Open));
        assert_eq!(filter.limit, 25);
    }

    #[test]
    fn incident_params_reject_unknown_status_and_bad_limit() {
        let limits = QueryLimits::default();
        let err = parse_incident_list_params(&query(&[("status", "REOPENED")]), &limits)
            .unwrap_err();
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);

        let err = parse_incident_list_params(&query(&[("limit", "0")]), &limits).unwrap_err();
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);

        let err = parse_incident_list_params(&query(&[("limit", "headful")]), &limits)
            .unwrap_err();
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);
    }

    #[test]
    fn status_mapping_matches_the_taxonomy() {
        assert_eq!(map_error_status(ApiErrorCode::ValidationFailed), 400);
        assert_eq!(map_error_status(ApiErrorCode::Unauthenticated), 401);
        assert_eq!(map_error_status(ApiErrorCode::Forbidden), 403);
        assert_eq!(map_error_status(ApiErrorCode::NotFound), 404);
        assert_eq!(map_error_status(ApiErrorCode::Internal), 500);
    }

    #[test]
    fn error_detail_shapes_are_stable() {
        let err = ApiError::invalid_param("limit", "nope");
        assert!(err.details.get("parameter").is_some());
        assert!(err.details.get("value").is_some());
        let err = ApiError::forbidden("manager");
        assert_eq!(err.details["required"], "manager");
    }
}
