//! Markup parser – converts one line of the restricted inline dialect into
//! styled runs, and classifies raw lines for the page flow.
//!
//! The dialect is a controlled markdown subset:
//! - Inline: `*`/`_` toggle italic, `**`/`__` toggle bold
//! - Block: `#`–`######` headings, `1.` ordered items, `-`/`*` unordered items
//!
//! We use a hand-written scanner for the controlled subset. Markers are never
//! balanced or validated – an unclosed marker leaves its style active for the
//! remainder of the line, matching forgiving markdown renderers.

use crate::style::{StyledRun, TextStyle};

/// Parse one line of inline markup into an ordered sequence of styled runs.
///
/// Flushed text is split into word runs separated by single `" "` separator
/// runs; consecutive whitespace collapses to one separator.
pub fn parse_inline(text: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    let mut style = TextStyle::default();
    let mut acc = String::new();

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' | '_' => {
                flush(&mut runs, &mut acc, &style);
                if chars.peek() == Some(&c) {
                    chars.next();
                    style.bold = !style.bold;
                } else {
                    style.italic = !style.italic;
                }
            }
            _ => acc.push(c),
        }
    }
    flush(&mut runs, &mut acc, &style);
    runs
}

/// Emit the accumulated text as word and separator runs under the current
/// style snapshot. Empty accumulation emits nothing.
fn flush(runs: &mut Vec<StyledRun>, acc: &mut String, style: &TextStyle) {
    if acc.is_empty() {
        return;
    }
    let mut word = String::new();
    let mut in_gap = false;
    for c in acc.chars() {
        if c.is_whitespace() {
            if !word.is_empty() {
                runs.push(StyledRun::new(std::mem::take(&mut word), style.clone()));
            }
            if !in_gap {
                runs.push(StyledRun::separator(style.clone()));
                in_gap = true;
            }
        } else {
            word.push(c);
            in_gap = false;
        }
    }
    if !word.is_empty() {
        runs.push(StyledRun::new(word, style.clone()));
    }
    acc.clear();
}

/// Classify the leading whitespace and marker syntax of a raw (untrimmed)
/// line into a unitless indentation tier, applied later as
/// `tier * font_size`.
///
/// Base: `floor(leading_whitespace / 2) * 0.25`. Bonus: +0.25 for a list
/// marker, else +0.75 for any leading whitespace, else +0.25 for any content.
pub fn classify_indentation(raw_line: &str) -> f32 {
    let leading = raw_line.chars().take_while(|c| c.is_whitespace()).count();
    let stripped = raw_line.trim_start();

    let base = (leading / 2) as f32 * 0.25;
    let bonus = if starts_with_list_marker(stripped) {
        0.25
    } else if leading > 0 {
        0.75
    } else if !stripped.is_empty() {
        0.25
    } else {
        0.0
    };
    base + bonus
}

fn starts_with_list_marker(s: &str) -> bool {
    if s.starts_with(['-', '*']) {
        return true;
    }
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && s[digits..].starts_with('.')
}

// ---------------------------------------------------------------------------
// Line classification for the page flow
// ---------------------------------------------------------------------------

/// Shape of one trimmed source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// Heading depth (1–6) and body text.
    Heading(u8, String),
    /// Ordered item: the literal number token (without the dot) and body.
    Ordered(String, String),
    /// Unordered item body.
    Unordered(String),
    Paragraph(String),
}

/// Classify a trimmed line. Seven or more `#` characters, or a marker with
/// no body, fall through to `Paragraph`.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) {
        let rest = &trimmed[hashes..];
        if rest.starts_with(char::is_whitespace) && !rest.trim().is_empty() {
            return LineKind::Heading(hashes as u8, rest.trim().to_string());
        }
    }

    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let after = &trimmed[digits..];
        if let Some(rest) = after.strip_prefix('.') {
            if rest.starts_with(char::is_whitespace) && !rest.trim().is_empty() {
                return LineKind::Ordered(trimmed[..digits].to_string(), rest.trim().to_string());
            }
        }
    }

    if let Some(rest) = trimmed.strip_prefix(['-', '*']) {
        if rest.starts_with(char::is_whitespace) && !rest.trim().is_empty() {
            return LineKind::Unordered(rest.trim().to_string());
        }
    }

    LineKind::Paragraph(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(runs: &[StyledRun]) -> Vec<&str> {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn style_round_trip() {
        let runs = parse_inline("**a** *b* c");
        assert_eq!(texts(&runs), vec!["a", " ", "b", " ", "c"]);
        assert!(runs[0].style.bold && !runs[0].style.italic);
        assert!(!runs[1].style.bold && !runs[1].style.italic);
        assert!(runs[2].style.italic && !runs[2].style.bold);
        assert!(!runs[4].style.bold && !runs[4].style.italic);
        // Concatenation reconstructs the input with markers removed.
        let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(joined, "a b c");
    }

    #[test]
    fn underscore_markers() {
        let runs = parse_inline("__strong__ and _soft_");
        assert!(runs[0].style.bold);
        assert_eq!(runs[0].text, "strong");
        let soft = runs.last().unwrap();
        assert!(soft.style.italic);
        assert_eq!(soft.text, "soft");
    }

    #[test]
    fn unclosed_marker_stays_active() {
        let runs = parse_inline("plain **rest of line");
        let last = runs.last().unwrap();
        assert_eq!(last.text, "line");
        assert!(last.style.bold);
    }

    #[test]
    fn empty_input_no_runs() {
        assert!(parse_inline("").is_empty());
        assert!(parse_inline("****").is_empty());
    }

    #[test]
    fn consecutive_whitespace_collapses() {
        let runs = parse_inline("a   b");
        assert_eq!(texts(&runs), vec!["a", " ", "b"]);
    }

    #[test]
    fn indentation_tiers() {
        assert!((classify_indentation("  - item") - 0.5).abs() < 1e-6);
        assert!((classify_indentation("no indent") - 0.25).abs() < 1e-6);
        assert_eq!(classify_indentation(""), 0.0);
        // Leading whitespace without a marker gets the deep tier.
        assert!((classify_indentation("    teks") - 1.25).abs() < 1e-6);
        // Ordered markers count as list markers.
        assert!((classify_indentation("12. item") - 0.25).abs() < 1e-6);
    }

    #[test]
    fn classify_heading_depths() {
        assert_eq!(
            classify_line("# Judul"),
            LineKind::Heading(1, "Judul".to_string())
        );
        assert_eq!(
            classify_line("###### kecil"),
            LineKind::Heading(6, "kecil".to_string())
        );
        // Seven hashes is not a heading.
        assert_eq!(
            classify_line("####### bukan"),
            LineKind::Paragraph("####### bukan".to_string())
        );
        // No body, no heading.
        assert_eq!(classify_line("##"), LineKind::Paragraph("##".to_string()));
    }

    #[test]
    fn classify_list_items() {
        assert_eq!(
            classify_line("3. tiga"),
            LineKind::Ordered("3".to_string(), "tiga".to_string())
        );
        assert_eq!(
            classify_line("- butir"),
            LineKind::Unordered("butir".to_string())
        );
        assert_eq!(
            classify_line("* butir"),
            LineKind::Unordered("butir".to_string())
        );
        // A bare number with a dot but no body stays a paragraph.
        assert_eq!(
            classify_line("3."),
            LineKind::Paragraph("3.".to_string())
        );
    }

    #[test]
    fn classify_blank_and_paragraph() {
        assert_eq!(classify_line("   "), LineKind::Blank);
        assert_eq!(
            classify_line("teks biasa"),
            LineKind::Paragraph("teks biasa".to_string())
        );
    }
}
