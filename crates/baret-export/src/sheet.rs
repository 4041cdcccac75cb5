// SPDX-License-Identifier: Apache-2.0
//! Spreadsheet rendering of the assessment export.
//!
//! One worksheet, one header row, one data row per assessment. Each data
//! row is filled with the color of its computed risk level so the sheet
//! reads like the on-screen matrix.

use baret_core::{risk_score, RiskLevel};
use baret_model::RiskAssessment;
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};

use crate::{ExportArtifact, ExportError, XLSX_CONTENT_TYPE};

const SHEET_NAME: &str = "Risk Değerlendirmeleri";

const HEADERS: [&str; 7] = [
    "Başlık",
    "Açıklama",
    "Konum",
    "Şiddet",
    "Olasılık",
    "Risk Seviyesi",
    "Tarih",
];

const COLUMN_WIDTHS: [f64; 7] = [32.0, 40.0, 22.0, 10.0, 10.0, 16.0, 14.0];

const HEADER_FILL: u32 = 0x00D9_D9D9;

/// Display projection of one assessment row.
///
/// Ratings stay as stored; only the level applies the default-rating rule,
/// so a half-filled assessment shows its blanks while still landing in a
/// level band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SheetRow {
    pub title: String,
    pub description: String,
    pub location: String,
    pub severity: Option<i32>,
    pub likelihood: Option<i32>,
    pub level: RiskLevel,
    pub date: String,
}

pub(crate) fn sheet_row(assessment: &RiskAssessment) -> SheetRow {
    SheetRow {
        title: assessment.title.clone(),
        description: assessment.description.clone().unwrap_or_default(),
        location: assessment.location.clone().unwrap_or_default(),
        severity: assessment.severity,
        likelihood: assessment.likelihood,
        level: RiskLevel::from_ratings(assessment.severity, assessment.likelihood),
        date: assessment.created_at.date_naive().to_string(),
    }
}

/// Renders the `.xlsx` artifact for the given assessments.
pub fn render_assessment_sheet(
    assessments: &[RiskAssessment],
    now: DateTime<Utc>,
) -> Result<ExportArtifact, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin);
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (index, assessment) in assessments.iter().enumerate() {
        let row = sheet_row(assessment);
        let fill = Format::new()
            .set_background_color(Color::RGB(row.level.fill_rgb()))
            .set_border(FormatBorder::Thin);
        let y = (index + 1) as u32;
        worksheet.write_string_with_format(y, 0, &row.title, &fill)?;
        worksheet.write_string_with_format(y, 1, &row.description, &fill)?;
        worksheet.write_string_with_format(y, 2, &row.location, &fill)?;
        match row.severity {
            Some(value) => {
                worksheet.write_number_with_format(y, 3, f64::from(value), &fill)?;
            }
            None => {
                worksheet.write_blank(y, 3, &fill)?;
            }
        }
        match row.likelihood {
            Some(value) => {
                worksheet.write_number_with_format(y, 4, f64::from(value), &fill)?;
            }
            None => {
                worksheet.write_blank(y, 4, &fill)?;
            }
        }
        worksheet.write_string_with_format(y, 5, row.level.label(), &fill)?;
        worksheet.write_string_with_format(y, 6, &row.date, &fill)?;
    }

    let bytes = workbook.save_to_buffer()?;
    Ok(ExportArtifact {
        filename: sheet_filename(now),
        content_type: XLSX_CONTENT_TYPE,
        bytes,
    })
}

#[must_use]
pub fn sheet_filename(now: DateTime<Utc>) -> String {
    format!("risk-degerlendirmeleri-{}.xlsx", now.date_naive())
}
