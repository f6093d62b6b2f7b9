//! Pipeline – ties together markup parsing, line breaking, pagination, and
//! PDF rendering into a single function call.

use crate::pagination::{advance_cursor, layout_text, Margins, PAGE_MARGIN_PT};
use crate::render::render_pdf;
use crate::style::{SectionKind, Typography};
use crate::surface::{LayoutRecord, RecordingSurface};

/// Page orientation for the generated PDF.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageOrientation {
    /// Portrait mode: height > width (default).
    #[default]
    Portrait,
    /// Landscape mode: width > height (short-edge binding).
    Landscape,
}

/// Configuration for the PDF generation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    /// Page width in points (default: A4 = 595.28).
    pub page_width: f32,
    /// Page height in points (default: A4 = 841.89).
    pub page_height: f32,
    /// Page margin in points (default: 40).
    pub page_margin: f32,
    /// Page orientation; swaps effective width/height when `Landscape`.
    pub orientation: PageOrientation,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            title: "ebook-press output".to_string(),
            page_width: 595.28,
            page_height: 841.89,
            page_margin: PAGE_MARGIN_PT,
            orientation: PageOrientation::Portrait,
        }
    }
}

impl PipelineConfig {
    /// Effective page width after applying orientation.
    pub fn effective_width(&self) -> f32 {
        match self.orientation {
            PageOrientation::Portrait => self.page_width,
            PageOrientation::Landscape => self.page_height,
        }
    }

    /// Effective page height after applying orientation.
    pub fn effective_height(&self) -> f32 {
        match self.orientation {
            PageOrientation::Portrait => self.page_height,
            PageOrientation::Landscape => self.page_width,
        }
    }

    /// Create an A4 landscape config.
    pub fn a4_landscape() -> Self {
        Self {
            orientation: PageOrientation::Landscape,
            ..Self::default()
        }
    }

    fn margins(&self) -> Margins {
        Margins::uniform(self.page_margin)
    }

    fn content_width(&self) -> f32 {
        self.effective_width() - 2.0 * self.page_margin
    }
}

/// Full pipeline: markup string → PDF bytes.
///
/// The document is split into paragraphs on blank lines; each paragraph is
/// laid out with the default paragraph typography and the cursor is chained
/// through. Returns `(pdf_bytes, layout_record)`.
pub fn generate_pdf(
    markup: &str,
    config: &PipelineConfig,
) -> Result<(Vec<u8>, LayoutRecord), String> {
    let mut record = compute_layout_record(markup, config);
    record.title = config.title.clone();
    let bytes = render_pdf(&record)?;
    Ok((bytes, record))
}

/// Convenience: generate PDF with default A4 config.
pub fn generate_pdf_from_markup(markup: &str) -> Result<Vec<u8>, String> {
    let (bytes, _) = generate_pdf(markup, &PipelineConfig::default())?;
    Ok(bytes)
}

/// Generate only the layout record (no PDF rendering) – useful for testing.
pub fn compute_layout_record(markup: &str, config: &PipelineConfig) -> LayoutRecord {
    let margins = config.margins();
    let typography = Typography::default();
    let opts = typography.options_for(SectionKind::Paragraph, config.content_width());

    let mut surface = RecordingSurface::new(
        config.effective_width(),
        config.effective_height(),
        margins.top,
    );
    let mut cursor = margins.top;

    // A table-of-contents document is laid out whole; splitting it into
    // paragraphs would strand back-matter entries in normal flow.
    let paragraphs: Vec<&str> = if crate::toc::is_table_of_contents(markup) {
        vec![markup]
    } else {
        markup.split("\n\n").collect()
    };
    let last = paragraphs.len().saturating_sub(1);
    for (i, paragraph) in paragraphs.iter().enumerate() {
        cursor = layout_text(paragraph, &opts, cursor, &margins, &mut surface);
        if i < last {
            // Paragraph gap.
            advance_cursor(&mut cursor, opts.line_height_px(), margins.bottom, &mut surface);
        }
    }
    surface.into_record()
}

/// Assemble a document from typed sections, each laid out under its own
/// typography. The table is validated once up front.
pub fn compose_pdf(
    sections: &[(SectionKind, &str)],
    config: &PipelineConfig,
    typography: &Typography,
) -> Result<(Vec<u8>, LayoutRecord), String> {
    typography.validate()?;

    let margins = config.margins();
    let mut surface = RecordingSurface::new(
        config.effective_width(),
        config.effective_height(),
        margins.top,
    );
    let mut cursor = margins.top;

    let last = sections.len().saturating_sub(1);
    for (i, (kind, markup)) in sections.iter().enumerate() {
        let opts = typography.options_for(*kind, config.content_width());
        cursor = layout_text(markup, &opts, cursor, &margins, &mut surface);
        if i < last {
            advance_cursor(&mut cursor, opts.line_height_px(), margins.bottom, &mut surface);
        }
    }

    let mut record = surface.into_record();
    record.title = config.title.clone();
    let bytes = render_pdf(&record)?;
    Ok((bytes, record))
}
