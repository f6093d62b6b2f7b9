//! Table-of-contents formatter – detects the front-matter/chapter listing
//! document shape and lays it out with dotted leaders and a right-aligned
//! page-number column instead of normal paragraph flow.

use crate::pagination::{advance_cursor, Margins};
use crate::style::LayoutOptions;
use crate::surface::Surface;

/// Trailing page label, e.g. "Pendahuluan - Halaman 5".
pub const PAGE_LABEL: &str = "- Halaman";
/// Chapter marker, e.g. "Bab 3 Metodologi".
pub const CHAPTER_LABEL: &str = "Bab";
/// Front-matter marker.
pub const FRONT_MATTER_LABEL: &str = "Kata Pengantar";

/// Title column offset right of an entry's prefix.
const TITLE_OFFSET: f32 = 15.0;
/// Width of the right-aligned page-number column.
const NUMBER_COLUMN: f32 = 10.0;
/// Right margin of the page-number column.
const RIGHT_MARGIN: f32 = 20.0;
/// Extra spacing between leader dots.
const DOT_GAP: f32 = 2.0;
/// Horizontal indent for sub-chapter entries.
const SUBCHAPTER_INDENT: f32 = 10.0;

/// Whether a whole document should be routed to the ToC formatter: it must
/// carry the page label plus either a chapter or a front-matter marker.
pub fn is_table_of_contents(text: &str) -> bool {
    text.contains(PAGE_LABEL)
        && (text.contains(CHAPTER_LABEL) || text.contains(FRONT_MATTER_LABEL))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    FrontMatter,
    Chapter,
    SubChapter,
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
struct TocEntry {
    kind: EntryKind,
    prefix: Option<String>,
    title: String,
    page: Option<String>,
}

/// Strip the trailing page token (decimal or lowercase roman, optionally
/// preceded by the page label) and classify the remaining content.
fn parse_entry(line: &str) -> TocEntry {
    let (content, page) = split_page_number(line);
    let (kind, prefix, title) = classify_entry(content);
    TocEntry {
        kind,
        prefix,
        title,
        page: page.map(str::to_string),
    }
}

fn split_page_number(line: &str) -> (&str, Option<&str>) {
    let trimmed = line.trim();
    let Some((head, tail)) = trimmed.rsplit_once(char::is_whitespace) else {
        return (trimmed, None);
    };
    if !is_page_token(tail) {
        return (trimmed, None);
    }
    let mut content = head.trim_end();
    if let Some(stripped) = content.strip_suffix(PAGE_LABEL) {
        content = stripped.trim_end();
    }
    (content, Some(tail))
}

fn is_page_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    token.chars().all(|c| c.is_ascii_digit())
        || token.chars().all(|c| "ivxlcdm".contains(c))
}

fn classify_entry(content: &str) -> (EntryKind, Option<String>, String) {
    if content.to_lowercase().starts_with("kata pengantar") {
        return (EntryKind::FrontMatter, None, content.to_string());
    }

    if let Some(rest) = content.strip_prefix("Bab ") {
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            let number = &rest[..digits];
            let title = rest[digits..].trim_start().to_string();
            return (EntryKind::Chapter, Some(format!("Bab {number}")), title);
        }
    }

    if let Some((prefix, title)) = split_subchapter(content) {
        return (EntryKind::SubChapter, Some(prefix), title);
    }

    (EntryKind::Plain, None, content.to_string())
}

/// Match `N.N title` and split off the numeric prefix.
fn split_subchapter(content: &str) -> Option<(String, String)> {
    let major = content.chars().take_while(|c| c.is_ascii_digit()).count();
    if major == 0 {
        return None;
    }
    let after_dot = content[major..].strip_prefix('.')?;
    let minor = after_dot.chars().take_while(|c| c.is_ascii_digit()).count();
    if minor == 0 || !after_dot[minor..].starts_with(char::is_whitespace) {
        return None;
    }
    let prefix_len = major + 1 + minor;
    Some((
        content[..prefix_len].to_string(),
        content[prefix_len..].trim_start().to_string(),
    ))
}

/// Lay the whole document out as a table of contents, one entry per line.
/// Blank lines advance the cursor and emit nothing; chapter entries take an
/// extra half line of trailing space.
pub fn layout_toc(
    text: &str,
    opts: &LayoutOptions,
    start_y: f32,
    margins: &Margins,
    surface: &mut dyn Surface,
) -> f32 {
    let line_height = opts.line_height_px();
    let mut cursor = start_y;

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            advance_cursor(&mut cursor, line_height, margins.bottom, surface);
            continue;
        }
        let entry = parse_entry(raw_line);
        advance_cursor(&mut cursor, line_height, margins.bottom, surface);
        draw_entry(&entry, cursor, opts, margins, surface);
        if entry.kind == EntryKind::Chapter {
            advance_cursor(&mut cursor, line_height / 2.0, margins.bottom, surface);
        }
    }
    cursor
}

fn draw_entry(
    entry: &TocEntry,
    y: f32,
    opts: &LayoutOptions,
    margins: &Margins,
    surface: &mut dyn Surface,
) {
    let bold = matches!(entry.kind, EntryKind::FrontMatter | EntryKind::Chapter);
    let x = margins.left
        + match entry.kind {
            EntryKind::SubChapter => SUBCHAPTER_INDENT,
            _ => 0.0,
        };

    surface.set_font(&opts.font_family, bold, false);
    surface.set_font_size(opts.font_size);

    let title_x = match &entry.prefix {
        Some(prefix) => {
            surface.draw_text(prefix, x, y);
            x + TITLE_OFFSET
        }
        None => x,
    };
    if !entry.title.is_empty() {
        surface.draw_text(&entry.title, title_x, y);
    }
    let title_end = title_x + surface.measure_text_width(&entry.title);

    // Leaders and the page number render in the normal weight of whatever
    // family is active.
    let (family, _, _) = surface.current_font();
    surface.set_font(&family, false, false);

    if let Some(page) = &entry.page {
        let column_x = surface.page_width() - RIGHT_MARGIN - NUMBER_COLUMN;
        let pitch = surface.measure_text_width(".") + DOT_GAP;
        let gap = column_x - title_end;
        let dots = if gap > 0.0 { (gap / pitch).floor() as usize } else { 0 };
        for i in 0..dots {
            surface.draw_text(".", title_end + i as f32 * pitch, y);
        }
        let number_width = surface.measure_text_width(page);
        let number_x = surface.page_width() - RIGHT_MARGIN - number_width;
        surface.draw_text(page, number_x, y);
    }
}
