// SPDX-License-Identifier: Apache-2.0
//! Paginated document rendering of the assessment export.
//!
//! A4 portrait, builtin Helvetica only. Builtin fonts are WinAnsi encoded,
//! so Turkish diacritics are folded to their ASCII neighbors before any
//! glyph reaches the page. Page footers are stamped after layout, once the
//! total page count is known.

use baret_core::RiskLevel;
use baret_model::RiskAssessment;
use chrono::{DateTime, Utc};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Point, Rect, Rgb,
};

use crate::{ExportArtifact, ExportError, PDF_CONTENT_TYPE};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const TABLE_WIDTH: f32 = 180.0;
const TITLE_BLOCK_HEIGHT: f32 = 14.0;
const HEADER_BAND_HEIGHT: f32 = 9.0;
const ROW_HEIGHT: f32 = 8.0;
const FOOTER_ZONE: f32 = 18.0;

// Row capacities derived from the geometry above; the first page loses
// TITLE_BLOCK_HEIGHT to the report title.
const ROWS_FIRST_PAGE: usize = 30;
const ROWS_LATER_PAGE: usize = 31;

// Column x offsets inside the table, in order: title, location, level, date.
const COLUMN_OFFSETS: [f32; 4] = [0.0, 78.0, 123.0, 153.0];
const TITLE_CHARS: usize = 44;
const LOCATION_CHARS: usize = 24;

const HEADER_FILL: u32 = 0x00D9_D9D9;
const RULE_COLOR: u32 = 0x00BF_BFBF;

/// Replaces the Turkish letters WinAnsi cannot encode with their closest
/// ASCII forms. Everything else passes through unchanged.
#[must_use]
pub fn fold_turkish(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            'ç' => 'c',
            'Ç' => 'C',
            'ğ' => 'g',
            'Ğ' => 'G',
            'ı' => 'i',
            'İ' => 'I',
            'ö' => 'o',
            'Ö' => 'O',
            'ş' => 's',
            'Ş' => 'S',
            'ü' => 'u',
            'Ü' => 'U',
            other => other,
        })
        .collect()
}

fn clip(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        let kept: String = head.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        head
    }
}

pub(crate) fn page_count(rows: usize) -> usize {
    if rows <= ROWS_FIRST_PAGE {
        return 1;
    }
    1 + (rows - ROWS_FIRST_PAGE).div_ceil(ROWS_LATER_PAGE)
}

fn rgb_color(rgb: u32) -> Color {
    let r = ((rgb >> 16) & 0xFF) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xFF) as f32 / 255.0;
    let b = (rgb & 0xFF) as f32 / 255.0;
    Color::Rgb(Rgb::new(r, g, b, None))
}

struct DocRow {
    title: String,
    location: String,
    level: RiskLevel,
    date: String,
}

fn doc_row(assessment: &RiskAssessment) -> DocRow {
    DocRow {
        title: clip(&fold_turkish(&assessment.title), TITLE_CHARS),
        location: clip(
            &fold_turkish(assessment.location.as_deref().unwrap_or_default()),
            LOCATION_CHARS,
        ),
        level: RiskLevel::from_ratings(assessment.severity, assessment.likelihood),
        date: assessment.created_at.date_naive().to_string(),
    }
}

fn draw_header_band(layer: &PdfLayerReference, top: f32, bold: &IndirectFontRef) {
    layer.set_fill_color(rgb_color(HEADER_FILL));
    layer.add_rect(
        Rect::new(
            Mm(MARGIN),
            Mm(top - HEADER_BAND_HEIGHT),
            Mm(MARGIN + TABLE_WIDTH),
            Mm(top),
        )
        .with_mode(PaintMode::Fill),
    );
    layer.set_fill_color(rgb_color(0x0000_0000));
    let baseline = top - HEADER_BAND_HEIGHT + 3.0;
    let captions = ["Başlık", "Konum", "Risk Seviyesi", "Tarih"];
    for (offset, caption) in COLUMN_OFFSETS.iter().zip(captions) {
        layer.use_text(
            fold_turkish(caption),
            10.0,
            Mm(MARGIN + offset + 2.0),
            Mm(baseline),
            bold,
        );
    }
}

fn draw_row(layer: &PdfLayerReference, top: f32, row: &DocRow, font: &IndirectFontRef) {
    layer.set_fill_color(rgb_color(row.level.fill_rgb()));
    layer.add_rect(
        Rect::new(
            Mm(MARGIN + COLUMN_OFFSETS[2]),
            Mm(top - ROW_HEIGHT),
            Mm(MARGIN + COLUMN_OFFSETS[3]),
            Mm(top),
        )
        .with_mode(PaintMode::Fill),
    );
    layer.set_fill_color(rgb_color(0x0000_0000));
    let baseline = top - 5.5;
    layer.use_text(
        row.title.clone(),
        9.0,
        Mm(MARGIN + COLUMN_OFFSETS[0] + 2.0),
        Mm(baseline),
        font,
    );
    layer.use_text(
        row.location.clone(),
        9.0,
        Mm(MARGIN + COLUMN_OFFSETS[1] + 2.0),
        Mm(baseline),
        font,
    );
    layer.use_text(
        fold_turkish(row.level.label()),
        9.0,
        Mm(MARGIN + COLUMN_OFFSETS[2] + 2.0),
        Mm(baseline),
        font,
    );
    layer.use_text(
        row.date.clone(),
        9.0,
        Mm(MARGIN + COLUMN_OFFSETS[3] + 2.0),
        Mm(baseline),
        font,
    );
    layer.set_outline_color(rgb_color(RULE_COLOR));
    layer.set_outline_thickness(0.4);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(top - ROW_HEIGHT)), false),
            (
                Point::new(Mm(MARGIN + TABLE_WIDTH), Mm(top - ROW_HEIGHT)),
                false,
            ),
        ],
        is_closed: false,
    });
}

/// Renders the `.pdf` artifact for the given assessments.
pub fn render_assessment_document(
    assessments: &[RiskAssessment],
    now: DateTime<Utc>,
) -> Result<ExportArtifact, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        fold_turkish("Risk Değerlendirme Raporu"),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "content",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ExportError(err.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| ExportError(err.to_string()))?;

    let mut pages: Vec<(PdfPageIndex, PdfLayerIndex)> = vec![(first_page, first_layer)];
    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    // First page carries the report title and the generation date.
    let title_baseline = PAGE_HEIGHT - MARGIN - 6.0;
    layer.set_fill_color(rgb_color(0x0000_0000));
    layer.use_text(
        fold_turkish("Risk Değerlendirme Raporu"),
        16.0,
        Mm(MARGIN),
        Mm(title_baseline),
        &bold,
    );
    layer.use_text(
        fold_turkish(&format!("Oluşturma tarihi: {}", now.date_naive())),
        10.0,
        Mm(MARGIN),
        Mm(title_baseline - 6.0),
        &font,
    );

    let mut table_top = PAGE_HEIGHT - MARGIN - TITLE_BLOCK_HEIGHT;
    draw_header_band(&layer, table_top, &bold);
    let mut cursor = table_top - HEADER_BAND_HEIGHT;
    let mut capacity = ROWS_FIRST_PAGE;
    let mut on_page = 0usize;

    for assessment in assessments {
        if on_page == capacity {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "content");
            pages.push((page, page_layer));
            layer = doc.get_page(page).get_layer(page_layer);
            table_top = PAGE_HEIGHT - MARGIN;
            draw_header_band(&layer, table_top, &bold);
            cursor = table_top - HEADER_BAND_HEIGHT;
            capacity = ROWS_LATER_PAGE;
            on_page = 0;
        }
        draw_row(&layer, cursor, &doc_row(assessment), &font);
        cursor -= ROW_HEIGHT;
        on_page += 1;
    }

    // Footers need the final page count, so they land after layout.
    let total = pages.len();
    for (index, (page, page_layer)) in pages.iter().enumerate() {
        let footer = doc.get_page(*page).get_layer(*page_layer);
        footer.set_fill_color(rgb_color(0x0000_0000));
        footer.use_text(
            format!("Sayfa {} / {}", index + 1, total),
            9.0,
            Mm(PAGE_WIDTH / 2.0 - 10.0),
            Mm(FOOTER_ZONE - 8.0),
            &font,
        );
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|err| ExportError(err.to_string()))?;
    Ok(ExportArtifact {
        filename: document_filename(now),
        content_type: PDF_CONTENT_TYPE,
        bytes,
    })
}

#[must_use]
pub fn document_filename(now: DateTime<Utc>) -> String {
    format!("risk-degerlendirme-raporu-{}.pdf", now.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use baret_model::AssessmentStatus;
    use chrono::TimeZone;

    fn assessment(title: &str, severity: Option<i32>) -> RiskAssessment {
        RiskAssessment::new(
            1,
            title.to_owned(),
            Some("Açıklama".to_owned()),
            None,
            Some("Kaynakhane".to_owned()),
            severity,
            Some(4),
            AssessmentStatus::Active,
            Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap(),
            Some("saha.uzmani".to_owned()),
        )
    }

    #[test]
    fn folding_covers_every_turkish_letter() {
        assert_eq!(fold_turkish("çÇğĞıİöÖşŞüÜ"), "cCgGiIoOsSuU");
        assert_eq!(fold_turkish("Güvenlik Önlemi"), "Guvenlik Onlemi");
        assert_eq!(fold_turkish("plain ascii 42"), "plain ascii 42");
    }

    #[test]
    fn clip_keeps_short_text_and_marks_long_text() {
        assert_eq!(clip("kisa", 10), "kisa");
        assert_eq!(clip("abcdefghij", 10), "abcdefghij");
        assert_eq!(clip("abcdefghijk", 10), "abcdefg...");
    }

    #[test]
    fn page_count_tracks_capacities() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(30), 1);
        assert_eq!(page_count(31), 2);
        assert_eq!(page_count(61), 2);
        assert_eq!(page_count(62), 3);
    }

    #[test]
    fn document_bytes_carry_the_pdf_signature() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let rows = vec![
            assessment("Yüksekte çalışma", Some(5)),
            assessment("Gürültü ölçümü", None),
        ];
        let artifact = render_assessment_document(&rows, now).unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF"));
        assert_eq!(
            artifact.filename,
            "risk-degerlendirme-raporu-2024-06-15.pdf"
        );
        assert_eq!(artifact.content_type, PDF_CONTENT_TYPE);
    }

    #[test]
    fn overflow_spills_onto_a_second_page() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let rows: Vec<RiskAssessment> = (0..40)
            .map(|n| assessment(&format!("Madde {n}"), Some(3)))
            .collect();
        assert_eq!(page_count(rows.len()), 2);
        let artifact = render_assessment_document(&rows, now).unwrap();
        let needle = b"/Count 2";
        let found = artifact
            .bytes
            .windows(needle.len())
            .any(|window| window == needle);
        assert!(found, "page tree should list two pages");
    }
}
