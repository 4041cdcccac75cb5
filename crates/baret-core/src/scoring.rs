// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Substituted for an absent severity or likelihood rating.
pub const DEFAULT_RATING: i32 = 3;

/// Ordinal risk classification derived from severity times likelihood.
///
/// Never persisted; recomputed at every read and export so two calls with
/// the same inputs always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Band thresholds over the raw product. Inputs are not clamped, so the
    /// match must stay total over all of `i32`.
    #[must_use]
    pub const fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=4 => Self::Low,
            5..=9 => Self::Medium,
            10..=14 => Self::High,
            _ => Self::Critical,
        }
    }

    #[must_use]
    pub const fn from_ratings(severity: Option<i32>, likelihood: Option<i32>) -> Self {
        Self::from_score(risk_score(severity, likelihood))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Düşük",
            Self::Medium => "Orta",
            Self::High => "Yüksek",
            Self::Critical => "Çok Yüksek",
        }
    }

    /// Fill color used by the export renderers, `0xRRGGBB`.
    #[must_use]
    pub const fn fill_rgb(self) -> u32 {
        match self {
            Self::Low => 0x92D050,
            Self::Medium => 0xFFFF00,
            Self::High => 0xFFC000,
            Self::Critical => 0xFF0000,
        }
    }

    /// Same palette as [`fill_rgb`](Self::fill_rgb), CSS-formatted for chart
    /// payloads.
    #[must_use]
    pub const fn css_color(self) -> &'static str {
        match self {
            Self::Low => "#92d050",
            Self::Medium => "#ffff00",
            Self::High => "#ffc000",
            Self::Critical => "#ff0000",
        }
    }

}

/// `severity * likelihood`, with absent ratings defaulting to
/// [`DEFAULT_RATING`]. Out-of-range ratings flow through unchanged.
#[must_use]
pub const fn risk_score(severity: Option<i32>, likelihood: Option<i32>) -> i32 {
    let s = match severity {
        Some(value) => value,
        None => DEFAULT_RATING,
    };
    let l = match likelihood {
        Some(value) => value,
        None => DEFAULT_RATING,
    };
    s * l
}

/// Counts per level over raw rating pairs, aligned with [`RiskLevel::ALL`].
#[must_use]
pub fn level_distribution(ratings: &[(Option<i32>, Option<i32>)]) -> [i64; 4] {
    let mut counts = [0i64; 4];
    for (severity, likelihood) in ratings {
        let level = RiskLevel::from_ratings(*severity, *likelihood);
        match level {
            RiskLevel::Low => counts[0] += 1,
            RiskLevel::Medium => counts[1] += 1,
            RiskLevel::High => counts[2] += 1,
            RiskLevel::Critical => counts[3] += 1,
        }
    }
    counts
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MatrixCell {
    pub severity: i32,
    pub likelihood: i32,
    pub score: i32,
    pub level: RiskLevel,
    pub label: String,
    pub color: String,
}

/// The full 5x5 severity-by-likelihood grid, severity-major.
#[must_use]
pub fn risk_matrix() -> Vec<MatrixCell> {
    let mut cells = Vec::with_capacity(25);
    for severity in 1..=5 {
        for likelihood in 1..=5 {
            let score = severity * likelihood;
            let level = RiskLevel::from_score(score);
            cells.push(MatrixCell {
                severity,
                likelihood,
                score,
                level,
                label: level.label().to_string(),
                color: level.css_color().to_string(),
            });
        }
    }
    cells
}
