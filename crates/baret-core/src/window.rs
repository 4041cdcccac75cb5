// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Symbolic stats range token.
///
/// The fetch offsets are wider than the token names suggest (`month` fetches
/// six months, `quarter` twelve, `year` thirty-six). The offsets are a
/// compatibility contract with the charts' consumers and are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatsWindow {
    #[default]
    Month,
    Quarter,
    Year,
}

impl StatsWindow {
    /// Absent or unrecognized tokens fall back to `month`; a window request
    /// never fails validation.
    #[must_use]
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some("quarter") => Self::Quarter,
            Some("year") => Self::Year,
            _ => Self::Month,
        }
    }

    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    #[must_use]
    pub const fn fetch_months(self) -> u32 {
        match self {
            Self::Month => 6,
            Self::Quarter => 12,
            Self::Year => 36,
        }
    }

    /// Start of the `[start, now)` fetch range. No end bound exists; callers
    /// filter with `>= start` only.
    #[must_use]
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.fetch_months()))
            .unwrap_or(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        rfc3339.parse().unwrap()
    }

    #[test]
    fn tokens_resolve_to_fixed_offsets() {
        let now = at("2024-06-15T12:00:00Z");
        assert_eq!(StatsWindow::Month.start(now), at("2023-12-15T12:00:00Z"));
        assert_eq!(StatsWindow::Quarter.start(now), at("2023-06-15T12:00:00Z"));
        assert_eq!(StatsWindow::Year.start(now), at("2021-06-15T12:00:00Z"));
    }

    #[test]
    fn unrecognized_and_absent_tokens_default_to_month() {
        assert_eq!(StatsWindow::parse_or_default(None), StatsWindow::Month);
        assert_eq!(StatsWindow::parse_or_default(Some("week")), StatsWindow::Month);
        assert_eq!(StatsWindow::parse_or_default(Some("YEAR")), StatsWindow::Month);
        assert_eq!(StatsWindow::parse_or_default(Some("year")), StatsWindow::Year);
    }

    #[test]
    fn month_end_starts_clamp_instead_of_overflowing() {
        let now = at("2024-03-31T09:00:00Z");
        // six months back from Mar 31 lands on Sep 30, never Oct 1
        assert_eq!(StatsWindow::Month.start(now), at("2023-09-30T09:00:00Z"));
    }
}
