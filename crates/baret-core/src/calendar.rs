// SPDX-License-Identifier: Apache-2.0

use baret_model::{Audit, EquipmentItem, TallyKey, TaskItem, Training};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Task,
    Training,
    Audit,
    Maintenance,
}

impl EventKind {
    /// Source collection behind events of this kind.
    #[must_use]
    pub const fn category(self) -> &'static str {
        match self {
            Self::Task => "tasks",
            Self::Training => "trainings",
            Self::Audit => "audits",
            Self::Maintenance => "equipment",
        }
    }
}

/// Ephemeral projection served by the calendar feed; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub date: Option<NaiveDate>,
    pub status: String,
    pub category: String,
}

impl CalendarEvent {
    fn project(id: i64, title: &str, kind: EventKind, date: Option<NaiveDate>, status: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            kind,
            date,
            status: status.to_string(),
            category: kind.category().to_string(),
        }
    }
}

/// Concatenates the four source projections in declaration order: tasks,
/// trainings, audits, equipment. No cross-source sorting; an equipment row
/// with no scheduled maintenance keeps a null date.
#[must_use]
pub fn merge_events(
    tasks: &[TaskItem],
    trainings: &[Training],
    audits: &[Audit],
    equipment: &[EquipmentItem],
) -> Vec<CalendarEvent> {
    let mut events =
        Vec::with_capacity(tasks.len() + trainings.len() + audits.len() + equipment.len());
    for task in tasks {
        events.push(CalendarEvent::project(
            task.id,
            &task.title,
            EventKind::Task,
            Some(task.due_date),
            task.status.token(),
        ));
    }
    for training in trainings {
        events.push(CalendarEvent::project(
            training.id,
            &training.title,
            EventKind::Training,
            Some(training.start_date),
            training.status.token(),
        ));
    }
    for audit in audits {
        events.push(CalendarEvent::project(
            audit.id,
            &audit.title,
            EventKind::Audit,
            Some(audit.audit_date),
            audit.status.token(),
        ));
    }
    for item in equipment {
        events.push(CalendarEvent::project(
            item.id,
            &item.name,
            EventKind::Maintenance,
            item.next_maintenance,
            item.status.token(),
        ));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use baret_model::{EquipmentStatus, ScheduleStatus};

    fn day(iso: &str) -> NaiveDate {
        iso.parse().unwrap()
    }

    #[test]
    fn projection_keeps_declaration_order_and_tags() {
        let tasks = [TaskItem::new(
            1,
            "Yangın tüpü kontrolü".to_string(),
            ScheduleStatus::Planned,
            day("2024-03-15"),
            None,
        )];
        let trainings = [Training::new(
            2,
            "İlk yardım eğitimi".to_string(),
            None,
            ScheduleStatus::Planned,
            day("2024-03-20"),
            None,
        )];
        let equipment = [EquipmentItem::new(
            3,
            "Kompresör".to_string(),
            None,
            EquipmentStatus::Active,
            None,
            Some(day("2024-03-28")),
        )];
        let events = merge_events(&tasks, &trainings, &[], &equipment);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, EventKind::Task);
        assert_eq!(events[0].category, "tasks");
        assert_eq!(events[1].kind, EventKind::Training);
        assert_eq!(events[1].category, "trainings");
        assert_eq!(events[2].kind, EventKind::Maintenance);
        assert_eq!(events[2].category, "equipment");
        assert_eq!(events[2].date, Some(day("2024-03-28")));
    }

    #[test]
    fn unscheduled_equipment_projects_a_null_date() {
        let equipment = [EquipmentItem::new(
            9,
            "Jeneratör".to_string(),
            None,
            EquipmentStatus::Faulty,
            None,
            None,
        )];
        let events = merge_events(&[], &[], &[], &equipment);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, None);
        assert_eq!(events[0].status, "FAULTY");

        let json = serde_json::to_value(&events[0]).unwrap();
        assert_eq!(json["date"], serde_json::Value::Null);
        assert_eq!(json["type"], "MAINTENANCE");
    }
}
