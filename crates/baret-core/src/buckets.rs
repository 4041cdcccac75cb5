// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed locale month table; index is `month0`.
pub const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

/// "MonthName Year" bucket label for any date-bearing value.
#[must_use]
pub fn month_label(date: &impl Datelike) -> String {
    format!("{} {}", TURKISH_MONTHS[date.month0() as usize], date.year())
}

/// Parallel label/count arrays, ordered oldest to newest, chart-ready.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub counts: Vec<i64>,
}

/// Twelve-slot trailing histogram ending at `now`.
///
/// Slots are seeded most-recent-first and flipped once at the end, so the
/// returned arrays read oldest to newest. A date whose label is not among
/// the twelve is dropped without complaint; fetch ranges wider than twelve
/// months (`quarter`, `year`) shed their older rows here.
#[must_use]
pub fn monthly_counts(dates: &[NaiveDate], now: DateTime<Utc>) -> MonthlySeries {
    let today = now.date_naive();
    let months_total = i64::from(today.year()) * 12 + i64::from(today.month0());

    let mut labels: Vec<String> = Vec::with_capacity(12);
    let mut counts: Vec<i64> = vec![0; 12];
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(12);
    for i in 0..12i64 {
        let t = months_total - i;
        let year = t.div_euclid(12);
        let month0 = t.rem_euclid(12) as usize;
        let label = format!("{} {}", TURKISH_MONTHS[month0], year);
        slots.insert(label.clone(), i as usize);
        labels.push(label);
    }

    for date in dates {
        if let Some(&slot) = slots.get(&month_label(date)) {
            counts[slot] += 1;
        }
    }

    labels.reverse();
    counts.reverse();
    MonthlySeries { labels, counts }
}
