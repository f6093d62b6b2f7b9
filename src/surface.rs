//! Drawing surface – the host contract the layout engine draws against, and
//! a recording implementation that freezes draw calls into a serialisable
//! structure that encodes exactly what goes on each page.
//!
//! The engine treats the surface's font state as an explicit register: every
//! component applies a [`Paint`](crate::style::Paint) before measuring or
//! drawing, so call ordering matters but no state hides inside the core.

use serde::{Deserialize, Serialize};

use crate::fonts::FontManager;
use crate::style::Paint;

/// Host drawing surface the layout engine renders against.
///
/// The cursor/page lifecycle is owned by the caller: `request_new_page`
/// resets the host's page state and returns the y coordinate at which the
/// engine resumes drawing.
pub trait Surface {
    fn set_font(&mut self, family: &str, bold: bool, italic: bool);
    fn set_font_size(&mut self, size: f32);
    /// Current `(family, bold, italic)` font state.
    fn current_font(&self) -> (String, bool, bool);
    /// Rendered width of `text` under the current font state.
    fn measure_text_width(&self, text: &str) -> f32;
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
    fn page_width(&self) -> f32;
    fn page_height(&self) -> f32;
    /// Start a new page; returns the y coordinate to resume at.
    fn request_new_page(&mut self) -> f32;
}

/// Apply `paint` then measure `text` in one step.
pub fn measure_styled(surface: &mut dyn Surface, paint: &Paint, text: &str) -> f32 {
    paint.apply(surface);
    surface.measure_text_width(text)
}

// ---------------------------------------------------------------------------
// Recorded layout – the frozen intermediate representation
// ---------------------------------------------------------------------------

/// One text draw call with the paint state it was issued under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawCommand {
    pub text: String,
    /// Position relative to page top-left, in points.
    pub x: f32,
    pub y: f32,
    pub font_family: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
}

/// One page of recorded draw calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub page_index: usize,
    pub commands: Vec<DrawCommand>,
}

/// A complete recorded document layout ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRecord {
    /// Document title embedded in the PDF metadata.
    #[serde(default = "LayoutRecord::default_title")]
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Ordered list of pages.
    pub pages: Vec<PageRecord>,
}

impl LayoutRecord {
    /// Create an A4 layout record.
    pub fn a4() -> Self {
        Self {
            title: Self::default_title(),
            // A4: 210mm × 297mm = 595.28 × 841.89 points
            page_width_pt: 595.28,
            page_height_pt: 841.89,
            pages: Vec::new(),
        }
    }

    fn default_title() -> String {
        "ebook-press output".to_string()
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

/// A [`Surface`] that measures through a [`FontManager`] and records every
/// draw call instead of rasterising it.
pub struct RecordingSurface {
    fonts: FontManager,
    page_width: f32,
    page_height: f32,
    /// Y coordinate handed back on every new-page request.
    resume_y: f32,
    family: String,
    bold: bool,
    italic: bool,
    size: f32,
    pages: Vec<PageRecord>,
    current: Vec<DrawCommand>,
    new_page_requests: usize,
}

impl RecordingSurface {
    pub fn new(page_width: f32, page_height: f32, resume_y: f32) -> Self {
        Self {
            fonts: FontManager::default(),
            page_width,
            page_height,
            resume_y,
            family: "Helvetica".to_string(),
            bold: false,
            italic: false,
            size: 12.0,
            pages: Vec::new(),
            current: Vec::new(),
            new_page_requests: 0,
        }
    }

    /// A4 surface resuming at the given top margin.
    pub fn a4(resume_y: f32) -> Self {
        Self::new(595.28, 841.89, resume_y)
    }

    /// Measure with custom fonts instead of the builtin heuristics.
    pub fn with_fonts(mut self, fonts: FontManager) -> Self {
        self.fonts = fonts;
        self
    }

    /// Number of times the engine asked for a new page.
    pub fn new_page_requests(&self) -> usize {
        self.new_page_requests
    }

    /// Finish recording, sealing the trailing page.
    pub fn into_record(mut self) -> LayoutRecord {
        let index = self.pages.len();
        self.pages.push(PageRecord {
            page_index: index,
            commands: std::mem::take(&mut self.current),
        });
        LayoutRecord {
            title: LayoutRecord::default_title(),
            page_width_pt: self.page_width,
            page_height_pt: self.page_height,
            pages: self.pages,
        }
    }
}

impl Surface for RecordingSurface {
    fn set_font(&mut self, family: &str, bold: bool, italic: bool) {
        self.family = family.to_string();
        self.bold = bold;
        self.italic = italic;
    }

    fn set_font_size(&mut self, size: f32) {
        self.size = size;
    }

    fn current_font(&self) -> (String, bool, bool) {
        (self.family.clone(), self.bold, self.italic)
    }

    fn measure_text_width(&self, text: &str) -> f32 {
        self.fonts
            .measure_text_width(text, self.size, self.bold, self.italic, &self.family)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.current.push(DrawCommand {
            text: text.to_string(),
            x,
            y,
            font_family: self.family.clone(),
            font_size: self.size,
            bold: self.bold,
            italic: self.italic,
        });
    }

    fn page_width(&self) -> f32 {
        self.page_width
    }

    fn page_height(&self) -> f32 {
        self.page_height
    }

    fn request_new_page(&mut self) -> f32 {
        let index = self.pages.len();
        self.pages.push(PageRecord {
            page_index: index,
            commands: std::mem::take(&mut self.current),
        });
        self.new_page_requests += 1;
        self.resume_y
    }
}
