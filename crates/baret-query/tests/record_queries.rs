// SPDX-License-Identifier: Apache-2.0

use baret_model::{
    AssessmentStatus, Department, Incident, IncidentSeverity, IncidentStatus, RiskAssessment,
};
use baret_query::{
    assessment_ratings, ensure_schema, incident_severity_counts, incident_status_counts,
    insert_assessment, insert_incident, list_assessments, list_incidents, module_counts,
    open_incident_count, AssessmentFilter, IncidentFilter, QueryLimits,
};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

fn db() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    ensure_schema(&conn).expect("schema");
    conn
}

fn at(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().expect("timestamp")
}

fn dept(name: &str) -> Department {
    Department::parse(name).expect("department")
}

fn incident(
    title: &str,
    department: Option<&str>,
    severity: IncidentSeverity,
    status: IncidentStatus,
    occurred_at: &str,
) -> Incident {
    Incident::new(
        0,
        title.to_string(),
        None,
        department.map(dept),
        None,
        severity,
        status,
        at(occurred_at),
        None,
    )
}

fn assessment(
    title: &str,
    department: Option<&str>,
    severity: Option<i32>,
    likelihood: Option<i32>,
    created_at: &str,
) -> RiskAssessment {
    RiskAssessment::new(
        0,
        title.to_string(),
        None,
        department.map(dept),
        None,
        severity,
        likelihood,
        AssessmentStatus::Active,
        at(created_at),
        None,
    )
}

#[test]
fn incident_listing_is_newest_first_and_limited() {
    let conn = db();
    for (title, when) in [
        ("eski", "2024-01-05T09:00:00Z"),
        ("orta", "2024-02-10T09:00:00Z"),
        ("yeni", "2024-03-20T09:00:00Z"),
    ] {
        insert_incident(
            &conn,
            &incident(title, None, IncidentSeverity::Low, IncidentStatus::Open, when),
        )
        .unwrap();
    }

    let limits = QueryLimits::default();
    let all = list_incidents(&conn, &IncidentFilter::default(), &limits).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].title, "yeni");
    assert_eq!(all[2].title, "eski");

    let filter = IncidentFilter {
        limit: 2,
        ..Default::default()
    };
    let capped = list_incidents(&conn, &filter, &limits).unwrap();
    assert_eq!(capped.len(), 2);
    assert_eq!(capped[1].title, "orta");
}

#[test]
fn incident_filters_compose() {
    let conn = db();
    insert_incident(
        &conn,
        &incident(
            "depo kayması",
            Some("Depo"),
            IncidentSeverity::High,
            IncidentStatus::Open,
            "2024-03-01T08:00:00Z",
        ),
    )
    .unwrap();
    insert_incident(
        &conn,
        &incident(
            "depo kapanan",
            Some("Depo"),
            IncidentSeverity::High,
            IncidentStatus::Closed,
            "2024-03-02T08:00:00Z",
        ),
    )
    .unwrap();
    insert_incident(
        &conn,
        &incident(
            "üretim arızası",
            Some("Üretim"),
            IncidentSeverity::High,
            IncidentStatus::Open,
            "2024-03-03T08:00:00Z",
        ),
    )
    .unwrap();

    let limits = QueryLimits::default();
    let filter = IncidentFilter {
        status: Some(IncidentStatus::Open),
        severity: Some(IncidentSeverity::High),
        department: Some(dept("Depo")),
        ..Default::default()
    };
    let rows = list_incidents(&conn, &filter, &limits).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "depo kayması");
    assert_eq!(rows[0].department, Some(dept("Depo")));
}

#[test]
fn incident_date_range_is_inclusive_per_day() {
    let conn = db();
    for when in [
        "2024-02-29T23:59:59Z",
        "2024-03-01T00:00:00Z",
        "2024-03-31T23:00:00Z",
        "2024-04-01T00:00:00Z",
    ] {
        insert_incident(
            &conn,
            &incident("sınır", None, IncidentSeverity::Low, IncidentStatus::Open, when),
        )
        .unwrap();
    }

    let filter = IncidentFilter {
        from: Some("2024-03-01".parse().unwrap()),
        to: Some("2024-03-31".parse().unwrap()),
        ..Default::default()
    };
    let rows = list_incidents(&conn, &filter, &QueryLimits::default()).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn rejects_out_of_range_limit() {
    let conn = db();
    let limits = QueryLimits::default();
    let filter = IncidentFilter {
        limit: limits.max_limit + 1,
        ..Default::default()
    };
    assert!(list_incidents(&conn, &filter, &limits).is_err());
}

#[test]
fn grouped_status_counts_respect_the_window() {
    let conn = db();
    insert_incident(
        &conn,
        &incident(
            "güncel açık",
            None,
            IncidentSeverity::Medium,
            IncidentStatus::Open,
            "2024-05-10T10:00:00Z",
        ),
    )
    .unwrap();
    insert_incident(
        &conn,
        &incident(
            "güncel çözüldü",
            None,
            IncidentSeverity::Low,
            IncidentStatus::Resolved,
            "2024-05-12T10:00:00Z",
        ),
    )
    .unwrap();
    insert_incident(
        &conn,
        &incident(
            "tarih öncesi",
            None,
            IncidentSeverity::Critical,
            IncidentStatus::Open,
            "2022-01-01T10:00:00Z",
        ),
    )
    .unwrap();

    let since = at("2024-01-01T00:00:00Z");
    let statuses = incident_status_counts(&conn, since).unwrap();
    assert_eq!(statuses.len(), 2);
    assert!(statuses.contains(&("OPEN".to_string(), 1)));
    assert!(statuses.contains(&("RESOLVED".to_string(), 1)));

    let severities = incident_severity_counts(&conn, since).unwrap();
    assert!(!severities.contains(&("CRITICAL".to_string(), 1)));
}

#[test]
fn assessment_ratings_window_is_optional() {
    let conn = db();
    insert_assessment(
        &conn,
        &assessment("eski", None, Some(5), Some(5), "2021-06-01T00:00:00Z"),
    )
    .unwrap();
    insert_assessment(
        &conn,
        &assessment("yeni", None, None, Some(2), "2024-05-01T00:00:00Z"),
    )
    .unwrap();

    let all = assessment_ratings(&conn, None).unwrap();
    assert_eq!(all.len(), 2);

    let windowed = assessment_ratings(&conn, Some(at("2024-01-01T00:00:00Z"))).unwrap();
    assert_eq!(windowed, vec![(None, Some(2))]);
}

#[test]
fn assessment_listing_filters_by_department() {
    let conn = db();
    insert_assessment(
        &conn,
        &assessment("depo rafları", Some("Depo"), Some(4), Some(4), "2024-04-01T00:00:00Z"),
    )
    .unwrap();
    insert_assessment(
        &conn,
        &assessment("pres hattı", Some("Üretim"), Some(2), Some(2), "2024-04-02T00:00:00Z"),
    )
    .unwrap();

    let filter = AssessmentFilter {
        department: Some(dept("Üretim")),
        ..Default::default()
    };
    let rows = list_assessments(&conn, &filter, &QueryLimits::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "pres hattı");
    assert_eq!(rows[0].severity, Some(2));
}

#[test]
fn module_counts_cover_every_table() {
    let conn = db();
    insert_incident(
        &conn,
        &incident(
            "tek olay",
            None,
            IncidentSeverity::Low,
            IncidentStatus::Open,
            "2024-03-01T00:00:00Z",
        ),
    )
    .unwrap();
    insert_assessment(
        &conn,
        &assessment("tek değerlendirme", None, Some(3), Some(3), "2024-03-02T00:00:00Z"),
    )
    .unwrap();

    let counts = module_counts(&conn).unwrap();
    assert_eq!(counts.incidents, 1);
    assert_eq!(counts.risk_assessments, 1);
    assert_eq!(counts.audits, 0);
    assert_eq!(counts.tasks, 0);
    assert_eq!(open_incident_count(&conn).unwrap(), 1);
}
