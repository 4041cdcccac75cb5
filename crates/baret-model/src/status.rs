// SPDX-License-Identifier: Apache-2.0

use crate::department::ParseError;
use serde::{Deserialize, Serialize};

/// Closed status domain usable as a fixed-shape tally key.
///
/// `KEYS` fixes both the tally domain and the chart ordering; `token` is the
/// stored wire form and `label` the Turkish display form.
pub trait TallyKey: Copy + Eq + Sized + 'static {
    const KEYS: &'static [Self];

    fn token(self) -> &'static str;
    fn label(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum IncidentStatus {
    Open,
    Investigating,
    Resolved,
    Closed,
}

impl IncidentStatus {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "OPEN" => Ok(Self::Open),
            "INVESTIGATING" => Ok(Self::Investigating),
            "RESOLVED" => Ok(Self::Resolved),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(ParseError::InvalidFormat(
                "incident status must be one of OPEN, INVESTIGATING, RESOLVED, CLOSED",
            )),
        }
    }
}

impl TallyKey for IncidentStatus {
    const KEYS: &'static [Self] = &[Self::Open, Self::Investigating, Self::Resolved, Self::Closed];

    fn token(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Investigating => "INVESTIGATING",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Open => "Açık",
            Self::Investigating => "İnceleniyor",
            Self::Resolved => "Çözüldü",
            Self::Closed => "Kapatıldı",
        }
    }
}

/// Shared lifecycle for scheduled work: tasks, trainings, audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ScheduleStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl ScheduleStatus {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "PLANNED" => Ok(Self::Planned),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ParseError::InvalidFormat(
                "schedule status must be one of PLANNED, IN_PROGRESS, COMPLETED, CANCELLED",
            )),
        }
    }
}

impl TallyKey for ScheduleStatus {
    const KEYS: &'static [Self] = &[
        Self::Planned,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    fn token(self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planlandı",
            Self::InProgress => "Devam Ediyor",
            Self::Completed => "Tamamlandı",
            Self::Cancelled => "İptal Edildi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum AssessmentStatus {
    Draft,
    Active,
    Reviewed,
    Archived,
}

impl AssessmentStatus {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "DRAFT" => Ok(Self::Draft),
            "ACTIVE" => Ok(Self::Active),
            "REVIEWED" => Ok(Self::Reviewed),
            "ARCHIVED" => Ok(Self::Archived),
            _ => Err(ParseError::InvalidFormat(
                "assessment status must be one of DRAFT, ACTIVE, REVIEWED, ARCHIVED",
            )),
        }
    }
}

impl TallyKey for AssessmentStatus {
    const KEYS: &'static [Self] = &[Self::Draft, Self::Active, Self::Reviewed, Self::Archived];

    fn token(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Reviewed => "REVIEWED",
            Self::Archived => "ARCHIVED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Draft => "Taslak",
            Self::Active => "Aktif",
            Self::Reviewed => "Gözden Geçirildi",
            Self::Archived => "Arşivlendi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum EquipmentStatus {
    Active,
    Maintenance,
    Faulty,
    Retired,
}

impl EquipmentStatus {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "ACTIVE" => Ok(Self::Active),
            "MAINTENANCE" => Ok(Self::Maintenance),
            "FAULTY" => Ok(Self::Faulty),
            "RETIRED" => Ok(Self::Retired),
            _ => Err(ParseError::InvalidFormat(
                "equipment status must be one of ACTIVE, MAINTENANCE, FAULTY, RETIRED",
            )),
        }
    }
}

impl TallyKey for EquipmentStatus {
    const KEYS: &'static [Self] = &[
        Self::Active,
        Self::Maintenance,
        Self::Faulty,
        Self::Retired,
    ];

    fn token(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Maintenance => "MAINTENANCE",
            Self::Faulty => "FAULTY",
            Self::Retired => "RETIRED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Aktif",
            Self::Maintenance => "Bakımda",
            Self::Faulty => "Arızalı",
            Self::Retired => "Kullanım Dışı",
        }
    }
}

/// Reported incident severity. Distinct from the computed risk level of an
/// assessment; incidents are graded directly at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IncidentSeverity {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(ParseError::InvalidFormat(
                "incident severity must be one of LOW, MEDIUM, HIGH, CRITICAL",
            )),
        }
    }
}

impl TallyKey for IncidentSeverity {
    const KEYS: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];

    fn token(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Low => "Düşük",
            Self::Medium => "Orta",
            Self::High => "Yüksek",
            Self::Critical => "Kritik",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(ParseError::InvalidFormat(
                "role must be one of admin, manager, employee",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_tokens() {
        for status in IncidentStatus::KEYS {
            assert_eq!(IncidentStatus::parse(status.token()), Ok(*status));
        }
        for status in ScheduleStatus::KEYS {
            assert_eq!(ScheduleStatus::parse(status.token()), Ok(*status));
        }
        for severity in IncidentSeverity::KEYS {
            assert_eq!(IncidentSeverity::parse(severity.token()), Ok(*severity));
        }
    }

    #[test]
    fn parse_rejects_foreign_tokens() {
        assert!(IncidentStatus::parse("open").is_err());
        assert!(ScheduleStatus::parse("DONE").is_err());
        assert!(Role::parse("ADMIN").is_err());
    }

    #[test]
    fn serde_uses_stored_tokens() {
        let json = serde_json::to_string(&ScheduleStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: ScheduleStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(back, ScheduleStatus::Cancelled);
    }

    #[test]
    fn labels_are_localized() {
        assert_eq!(TallyKey::label(IncidentStatus::Open), "Açık");
        assert_eq!(TallyKey::label(ScheduleStatus::Completed), "Tamamlandı");
        assert_eq!(TallyKey::label(IncidentSeverity::Critical), "Kritik");
    }
}
