//! Style model – the run/line data types shared by every layout stage, plus
//! the per-section typography table used when assembling a whole book.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// Horizontal alignment for a laid-out paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// List context a run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    None,
    Ordered,
    Unordered,
}

/// Resolved style of a contiguous span of text.
///
/// Invariant: the owning run's text carries no markup markers – they are
/// stripped during inline parsing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    /// Heading depth 1–6, or `None` for body text.
    pub heading: Option<u8>,
    pub list_kind: ListKind,
    pub list_level: u32,
    /// Unitless indentation tier, applied as `indentation * font_size`.
    pub indentation: f32,
}

/// A span of text under one style. A run whose text is exactly `" "` is a
/// semantic word separator, distinct from words that happen to contain a
/// space character.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// An inter-word separator run.
    pub fn separator(style: TextStyle) -> Self {
        Self {
            text: " ".to_string(),
            style,
        }
    }

    pub fn is_separator(&self) -> bool {
        self.text == " "
    }
}

/// One visually wrapped output row.
pub type Line = Vec<StyledRun>;

/// Per-paragraph layout configuration. Immutable for the duration of one
/// layout call.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Full column width available to the paragraph, before indentation.
    pub max_width: f32,
    pub align: Align,
    pub font_size: f32,
    /// Line height as a factor of the font size.
    pub line_height: f32,
    pub font_family: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_width: 515.28,
            align: Align::Left,
            font_size: 12.0,
            line_height: 1.4,
            font_family: "Helvetica".to_string(),
        }
    }
}

impl LayoutOptions {
    /// Height of one body line.
    pub fn line_height_px(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// Effective font size for a style, scaling headings as
    /// `base * (2.5 - level * 0.3)`.
    pub fn font_size_for(&self, style: &TextStyle) -> f32 {
        match style.heading {
            Some(level) => self.font_size * (2.5 - level as f32 * 0.3),
            None => self.font_size,
        }
    }
}

/// The explicit "current paint style" value applied to the surface before
/// every measurement and draw call. Headings render bold at their scaled
/// size regardless of inline markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint<'a> {
    pub family: &'a str,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl<'a> Paint<'a> {
    pub fn of(style: &TextStyle, opts: &'a LayoutOptions) -> Self {
        Self {
            family: &opts.font_family,
            size: opts.font_size_for(style),
            bold: style.bold || style.heading.is_some(),
            italic: style.italic,
        }
    }

    /// Push this paint onto the surface's font state.
    pub fn apply(&self, surface: &mut dyn Surface) {
        surface.set_font(self.family, self.bold, self.italic);
        surface.set_font_size(self.size);
    }
}

// ---------------------------------------------------------------------------
// Per-section typography
// ---------------------------------------------------------------------------

/// Document section kinds with independent typography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Title,
    Subtitle,
    Paragraph,
    Header,
    Footer,
    FrontMatter,
    Chapter,
    SubChapter,
    BackMatter,
}

/// Typography for one section kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionStyle {
    pub font_family: String,
    pub font_size: f32,
    #[serde(default)]
    pub align: Align,
    pub line_height: f32,
}

/// Lookup table mapping section kinds to their typography. Plain external
/// configuration data, validated once at document-assembly time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Typography {
    pub sections: HashMap<SectionKind, SectionStyle>,
}

impl Default for Typography {
    fn default() -> Self {
        let mut sections = HashMap::new();
        let body = |size: f32, align: Align| SectionStyle {
            font_family: "Helvetica".to_string(),
            font_size: size,
            align,
            line_height: 1.4,
        };
        sections.insert(SectionKind::Title, body(28.0, Align::Center));
        sections.insert(SectionKind::Subtitle, body(18.0, Align::Center));
        sections.insert(SectionKind::Paragraph, body(12.0, Align::Justify));
        sections.insert(SectionKind::Header, body(9.0, Align::Right));
        sections.insert(SectionKind::Footer, body(9.0, Align::Center));
        sections.insert(SectionKind::FrontMatter, body(12.0, Align::Left));
        sections.insert(SectionKind::Chapter, body(16.0, Align::Left));
        sections.insert(SectionKind::SubChapter, body(13.0, Align::Left));
        sections.insert(SectionKind::BackMatter, body(11.0, Align::Left));
        Self { sections }
    }
}

impl Typography {
    /// Deserialise from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let table: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        table.validate()?;
        Ok(table)
    }

    /// Reject styles that would produce degenerate layout.
    pub fn validate(&self) -> Result<(), String> {
        for (kind, style) in &self.sections {
            if style.font_family.trim().is_empty() {
                return Err(format!("section {kind:?}: empty font family"));
            }
            if style.font_size <= 0.0 {
                return Err(format!("section {kind:?}: font size must be positive"));
            }
            if style.line_height <= 0.0 {
                return Err(format!("section {kind:?}: line height must be positive"));
            }
        }
        Ok(())
    }

    /// Layout options for a section at the given column width. Unknown kinds
    /// fall back to the paragraph style.
    pub fn options_for(&self, kind: SectionKind, max_width: f32) -> LayoutOptions {
        let style = self
            .sections
            .get(&kind)
            .or_else(|| self.sections.get(&SectionKind::Paragraph));
        match style {
            Some(s) => LayoutOptions {
                max_width,
                align: s.align,
                font_size: s.font_size,
                line_height: s.line_height,
                font_family: s.font_family.clone(),
            },
            None => LayoutOptions {
                max_width,
                ..LayoutOptions::default()
            },
        }
    }
}
