//! Font metrics using `ttf-parser`.
//!
//! The layout engine never guesses widths: every break and alignment decision
//! is driven by measured glyph advances. When no real font bytes are loaded
//! we fall back to an average-character-width heuristic so layout stays
//! deterministic and testable.

use std::collections::HashMap;

/// Average char width as a fraction of the font size for the heuristic path.
const AVG_CHAR_FRACTION: f32 = 0.5;
/// Bold glyphs are ~10 % wider.
const AVG_CHAR_FRACTION_BOLD: f32 = 0.55;

/// A loaded font face with metrics.
#[derive(Clone)]
pub struct FontData {
    /// Raw font bytes (kept alive for ttf-parser's zero-copy API).
    pub bytes: Vec<u8>,
    pub units_per_em: f32,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FontKey {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

/// Manages loaded fonts and answers width queries.
pub struct FontManager {
    fonts: HashMap<FontKey, FontData>,
    /// Fallback key when a requested face is not loaded.
    default_key: FontKey,
}

impl FontManager {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            default_key: FontKey {
                family: "Helvetica".to_string(),
                bold: false,
                italic: false,
            },
        }
    }

    /// Load a TTF/OTF font from bytes.
    pub fn load_font(
        &mut self,
        family: &str,
        bold: bool,
        italic: bool,
        bytes: Vec<u8>,
    ) -> Result<(), String> {
        let face = ttf_parser::Face::parse(&bytes, 0)
            .map_err(|e| format!("Failed to parse font: {e}"))?;

        let data = FontData {
            units_per_em: face.units_per_em() as f32,
            bytes,
        };

        let key = FontKey {
            family: family.to_string(),
            bold,
            italic,
        };

        if self.fonts.is_empty() {
            self.default_key = key.clone();
        }
        self.fonts.insert(key, data);
        Ok(())
    }

    /// Register builtin Helvetica variants with synthetic metrics so the
    /// heuristic path works without any TTF on disk.
    pub fn ensure_default(&mut self) {
        if !self.fonts.is_empty() {
            return;
        }
        for (bold, italic) in [(false, false), (true, false), (false, true), (true, true)] {
            let key = FontKey {
                family: "Helvetica".to_string(),
                bold,
                italic,
            };
            self.fonts.insert(
                key,
                FontData {
                    bytes: Vec::new(),
                    units_per_em: 1000.0,
                },
            );
        }
        self.default_key = FontKey {
            family: "Helvetica".to_string(),
            bold: false,
            italic: false,
        };
    }

    /// Get font data for a key, falling back to the default.
    pub fn get(&self, key: &FontKey) -> &FontData {
        self.fonts.get(key).unwrap_or_else(|| {
            self.fonts.get(&self.default_key).expect("No fonts loaded")
        })
    }

    /// Measure the rendered width of a string at a given font size.
    ///
    /// With real font bytes we sum glyph advances; otherwise the heuristic
    /// (`0.5 × size` per char, `0.55` when bold) applies.
    pub fn measure_text_width(
        &self,
        text: &str,
        font_size: f32,
        bold: bool,
        italic: bool,
        family: &str,
    ) -> f32 {
        let key = FontKey {
            family: family.to_string(),
            bold,
            italic,
        };
        let data = self.get(&key);

        if data.bytes.is_empty() {
            let avg = if bold {
                AVG_CHAR_FRACTION_BOLD
            } else {
                AVG_CHAR_FRACTION
            };
            return text.chars().count() as f32 * font_size * avg;
        }

        if let Ok(face) = ttf_parser::Face::parse(&data.bytes, 0) {
            let scale = font_size / data.units_per_em;
            let mut width = 0.0f32;
            for ch in text.chars() {
                if let Some(gid) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(gid).unwrap_or(0);
                    width += advance as f32 * scale;
                } else {
                    // Missing glyph
                    width += font_size * AVG_CHAR_FRACTION;
                }
            }
            width
        } else {
            text.chars().count() as f32 * font_size * AVG_CHAR_FRACTION
        }
    }

    /// Height of one line at the given size and line-height factor.
    pub fn line_height_px(&self, font_size: f32, line_height_factor: f32) -> f32 {
        font_size * line_height_factor
    }
}

impl Default for FontManager {
    fn default() -> Self {
        let mut mgr = Self::new();
        mgr.ensure_default();
        mgr
    }
}
