#![forbid(unsafe_code)]
//! Deterministic analytics core: scoring, windowing, bucketing, tallies,
//! calendar projection. No function in this crate reads the wall clock;
//! callers inject `now`.

use sha2::{Digest, Sha256};

mod buckets;
mod calendar;
mod chart;
mod scoring;
mod tally;
mod window;

pub use buckets::{month_label, monthly_counts, MonthlySeries, TURKISH_MONTHS};
pub use calendar::{merge_events, CalendarEvent, EventKind};
pub use chart::{ChartDataset, ChartSeries, MONTHLY_SERIES_COLOR};
pub use scoring::{
    level_distribution, risk_matrix, risk_score, MatrixCell, RiskLevel, DEFAULT_RATING,
};
pub use tally::StatusTally;
pub use window::StatsWindow;

pub const CRATE_NAME: &str = "baret-core";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
