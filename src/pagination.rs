//! Page flow controller – the top-level driver that walks a paragraph's
//! lines, dispatches each to the break/render pipeline, and advances the
//! vertical cursor across page boundaries.
//!
//! The cursor is the only state threaded across calls: created at entry,
//! advanced after every emitted line, reset by new-page requests, and
//! returned so the host can chain subsequent paragraphs.

use crate::layout::{aligned_x, render_line};
use crate::linebreak::{break_lines, line_width};
use crate::markup::{classify_indentation, classify_line, parse_inline, LineKind};
use crate::style::{LayoutOptions, ListKind, Paint, StyledRun, TextStyle};
use crate::surface::{measure_styled, Surface};
use crate::toc;

/// Default page margins in points.
pub const PAGE_MARGIN_PT: f32 = 40.0;

/// Horizontal gap between a list marker and its item content.
const LIST_GUTTER: f32 = 5.0;

const BULLET: &str = "\u{2022}";

/// Printable-area margins.
#[derive(Debug, Clone, Copy)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(PAGE_MARGIN_PT)
    }
}

/// Advance the cursor by `step`, requesting a new page when the next line
/// would cross the printable bottom. Returns whether a page break happened.
pub(crate) fn advance_cursor(
    cursor: &mut f32,
    step: f32,
    bottom_margin: f32,
    surface: &mut dyn Surface,
) -> bool {
    *cursor += step;
    if *cursor > surface.page_height() - bottom_margin {
        *cursor = surface.request_new_page();
        true
    } else {
        false
    }
}

/// Lay out one paragraph of markup starting at `start_y` and return the
/// cursor position after its last line.
///
/// The entry point normalises horizontal rules to newlines, collapses runs
/// of blank lines, and routes table-of-contents shaped documents to the
/// dotted-leader formatter. Empty input returns the cursor unchanged.
pub fn layout_text(
    text: &str,
    opts: &LayoutOptions,
    start_y: f32,
    margins: &Margins,
    surface: &mut dyn Surface,
) -> f32 {
    if text.is_empty() {
        return start_y;
    }

    let normalized = normalize(text);
    if toc::is_table_of_contents(&normalized) {
        return toc::layout_toc(&normalized, opts, start_y, margins, surface);
    }

    let mut cursor = start_y;
    for raw_line in normalized.lines() {
        let indentation = classify_indentation(raw_line);
        let nested = raw_line.starts_with(char::is_whitespace);
        let list_level = if nested { 1 } else { 0 };

        match classify_line(raw_line) {
            LineKind::Blank => {
                advance_cursor(&mut cursor, opts.line_height_px(), margins.bottom, surface);
            }
            LineKind::Heading(level, body) => {
                let mut runs = parse_inline(&body);
                for run in &mut runs {
                    run.style.heading = Some(level);
                    run.style.indentation = indentation;
                }
                let heading = TextStyle {
                    heading: Some(level),
                    ..TextStyle::default()
                };
                let line_height = opts.font_size_for(&heading) * opts.line_height;
                emit_block(
                    &runs,
                    indentation,
                    None,
                    line_height,
                    opts,
                    &mut cursor,
                    margins,
                    surface,
                );
            }
            LineKind::Ordered(number, body) => {
                let marker = format!("{number}.");
                let runs = item_runs(&body, ListKind::Ordered, list_level, indentation);
                emit_block(
                    &runs,
                    indentation,
                    Some(&marker),
                    opts.line_height_px(),
                    opts,
                    &mut cursor,
                    margins,
                    surface,
                );
            }
            LineKind::Unordered(body) => {
                let runs = item_runs(&body, ListKind::Unordered, list_level, indentation);
                emit_block(
                    &runs,
                    indentation,
                    Some(BULLET),
                    opts.line_height_px(),
                    opts,
                    &mut cursor,
                    margins,
                    surface,
                );
            }
            LineKind::Paragraph(body) => {
                let mut runs = parse_inline(&body);
                for run in &mut runs {
                    run.style.indentation = indentation;
                }
                emit_block(
                    &runs,
                    indentation,
                    None,
                    opts.line_height_px(),
                    opts,
                    &mut cursor,
                    margins,
                    surface,
                );
            }
        }
    }
    cursor
}

/// Collapse horizontal rules to newlines and runs of blank lines to one.
fn normalize(text: &str) -> String {
    let mut s = text.replace("---", "\n");
    while s.contains("\n\n\n") {
        s = s.replace("\n\n\n", "\n\n");
    }
    s
}

fn item_runs(body: &str, kind: ListKind, level: u32, indentation: f32) -> Vec<StyledRun> {
    let mut runs = parse_inline(body);
    for run in &mut runs {
        run.style.list_kind = kind;
        run.style.list_level = level;
        run.style.indentation = indentation;
    }
    runs
}

/// Break one logical line's runs and emit every wrapped line, drawing the
/// optional list marker in the gutter of the first.
fn emit_block(
    runs: &[StyledRun],
    indentation: f32,
    marker: Option<&str>,
    line_height: f32,
    opts: &LayoutOptions,
    cursor: &mut f32,
    margins: &Margins,
    surface: &mut dyn Surface,
) {
    let indent_px = indentation * opts.font_size;
    let marker_x = margins.left + indent_px;

    // A marker narrows the content column and shifts its origin.
    let marker_reserved = match marker {
        Some(m) => {
            let paint = Paint::of(&TextStyle::default(), opts);
            measure_styled(surface, &paint, m) + LIST_GUTTER
        }
        None => 0.0,
    };

    let column_max = opts.max_width - marker_reserved;
    let lines = break_lines(runs, column_max, indentation, opts, surface);
    if lines.is_empty() {
        return;
    }

    let available = column_max - indent_px;
    let base_x = marker_x + marker_reserved;
    let last = lines.len() - 1;

    for (i, line) in lines.iter().enumerate() {
        advance_cursor(cursor, line_height, margins.bottom, surface);
        if i == 0 {
            if let Some(m) = marker {
                let paint = Paint::of(&TextStyle::default(), opts);
                paint.apply(surface);
                surface.draw_text(m, marker_x, *cursor);
            }
        }
        let total = line_width(line, opts, surface);
        let x = aligned_x(opts.align, base_x, available, total);
        render_line(line, x, *cursor, available, i == last, opts, surface);
    }
}
