// SPDX-License-Identifier: Apache-2.0
#![forbid(unsafe_code)]
//! Downloadable report rendering for risk assessments.
//!
//! Two renderers over the same row set: a spreadsheet (`sheet`) and a
//! paginated document (`document`). Neither reads the wall clock; the
//! caller passes the instant stamped into filenames and titles.

pub mod document;
pub mod sheet;

pub use document::render_assessment_document;
pub use sheet::render_assessment_sheet;

pub const CRATE_NAME: &str = "baret-export";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A fully rendered download: bytes plus the headers the transport needs.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Rendering failure surfaced by either backend.
#[derive(Debug)]
pub struct ExportError(pub String);

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "export error: {}", self.0)
    }
}

impl std::error::Error for ExportError {}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError(err.to_string())
    }
}
