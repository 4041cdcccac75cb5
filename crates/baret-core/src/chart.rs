// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Bar color for the monthly history series.
pub const MONTHLY_SERIES_COLOR: &str = "#3b82f6";

/// One dataset in the chart wire shape. Field names follow the chart
/// consumer's conventions, hence the camelCase rename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<i64>,
    #[serde(rename = "backgroundColor")]
    pub background_color: Vec<String>,
}

/// `{labels, datasets}` parallel-array payload; every aggregation endpoint
/// answers in this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartSeries {
    /// Single dataset painted one color per point.
    #[must_use]
    pub fn uniform(label: &str, labels: Vec<String>, data: Vec<i64>, color: &str) -> Self {
        let background_color = vec![color.to_string(); data.len()];
        Self {
            labels,
            datasets: vec![ChartDataset {
                label: label.to_string(),
                data,
                background_color,
            }],
        }
    }
}
