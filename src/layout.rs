//! Line renderer – computes per-run x offsets for one wrapped line and
//! issues the draw calls.
//!
//! Justification stretches the inter-word gaps so the line's rendered width
//! matches the column exactly; the final line of a justified paragraph, and
//! any line with at most one run, falls back to ordinary spacing.

use crate::style::{Align, LayoutOptions, Line, Paint};
use crate::surface::{measure_styled, Surface};

/// Starting x for a line of measured width `total` in a column of width
/// `available` anchored at `x`. Justified lines start at `x`; the stretch
/// happens inside [`render_line`].
pub fn aligned_x(align: Align, x: f32, available: f32, total: f32) -> f32 {
    match align {
        Align::Left | Align::Justify => x,
        Align::Center => x + (available - total) / 2.0,
        Align::Right => x + available - total,
    }
}

/// Draw one wrapped line at `(x, y)`.
///
/// `max_width` is the column width used to stretch justified lines;
/// `is_last` marks the paragraph's final line, which never stretches.
pub fn render_line(
    line: &Line,
    x: f32,
    y: f32,
    max_width: f32,
    is_last: bool,
    opts: &LayoutOptions,
    surface: &mut dyn Surface,
) {
    if line.is_empty() {
        return;
    }

    let justified = opts.align == Align::Justify && !is_last && line.len() > 1;
    if justified {
        render_justified(line, x, y, max_width, opts, surface);
    } else {
        render_natural(line, x, y, opts, surface);
    }
}

/// Ordinary left-to-right drawing with natural spacing.
fn render_natural(line: &Line, x: f32, y: f32, opts: &LayoutOptions, surface: &mut dyn Surface) {
    let mut cursor_x = x;
    for run in line {
        let paint = Paint::of(&run.style, opts);
        let width = measure_styled(surface, &paint, &run.text);
        if !run.is_separator() {
            surface.draw_text(&run.text, cursor_x, y);
        }
        cursor_x += width;
    }
}

/// Stretched drawing: every separator gap advances by an equal share of the
/// slack so the sum of advances equals `max_width`.
fn render_justified(
    line: &Line,
    x: f32,
    y: f32,
    max_width: f32,
    opts: &LayoutOptions,
    surface: &mut dyn Surface,
) {
    let mut text_total = 0.0f32;
    let mut gaps = 0usize;
    for run in line {
        if run.is_separator() {
            gaps += 1;
        } else {
            let paint = Paint::of(&run.style, opts);
            text_total += measure_styled(surface, &paint, &run.text);
        }
    }

    if gaps == 0 {
        render_natural(line, x, y, opts, surface);
        return;
    }
    let gap_advance = (max_width - text_total).max(0.0) / gaps as f32;

    let mut cursor_x = x;
    for run in line {
        if run.is_separator() {
            cursor_x += gap_advance;
            continue;
        }
        let paint = Paint::of(&run.style, opts);
        let width = measure_styled(surface, &paint, &run.text);
        surface.draw_text(&run.text, cursor_x, y);
        cursor_x += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_inline;
    use crate::surface::RecordingSurface;

    fn opts(align: Align) -> LayoutOptions {
        LayoutOptions {
            max_width: 100.0,
            align,
            font_size: 10.0,
            line_height: 1.4,
            ..LayoutOptions::default()
        }
    }

    // "aa bb cc" under the heuristic: each word 10 wide, each gap 5.
    fn three_words() -> Line {
        parse_inline("aa bb cc")
    }

    #[test]
    fn justify_distributes_slack_evenly() {
        let mut surface = RecordingSurface::a4(40.0);
        let line = three_words();
        render_line(&line, 0.0, 50.0, 100.0, false, &opts(Align::Justify), &mut surface);

        let record = surface.into_record();
        let commands = &record.pages[0].commands;
        assert_eq!(commands.len(), 3);
        // Slack = 100 - 30 text = 70, two gaps of 35 each.
        assert!((commands[0].x - 0.0).abs() < 1e-3);
        assert!((commands[1].x - 45.0).abs() < 1e-3);
        assert!((commands[2].x - 90.0).abs() < 1e-3);
        // The final advance lands exactly on the column width.
        assert!((commands[2].x + 10.0 - 100.0).abs() < 1e-3);
    }

    #[test]
    fn last_line_keeps_natural_spacing() {
        let mut surface = RecordingSurface::a4(40.0);
        let line = three_words();
        render_line(&line, 0.0, 50.0, 100.0, true, &opts(Align::Justify), &mut surface);

        let record = surface.into_record();
        let commands = &record.pages[0].commands;
        assert!((commands[1].x - 15.0).abs() < 1e-3);
        assert!((commands[2].x - 30.0).abs() < 1e-3);
    }

    #[test]
    fn single_run_line_never_stretches() {
        let mut surface = RecordingSurface::a4(40.0);
        let line = parse_inline("sendiri");
        render_line(&line, 10.0, 50.0, 100.0, false, &opts(Align::Justify), &mut surface);

        let record = surface.into_record();
        assert!((record.pages[0].commands[0].x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(aligned_x(Align::Left, 40.0, 100.0, 60.0), 40.0);
        assert_eq!(aligned_x(Align::Center, 40.0, 100.0, 60.0), 60.0);
        assert_eq!(aligned_x(Align::Right, 40.0, 100.0, 60.0), 80.0);
        assert_eq!(aligned_x(Align::Justify, 40.0, 100.0, 60.0), 40.0);
    }

    #[test]
    fn separators_are_not_drawn() {
        let mut surface = RecordingSurface::a4(40.0);
        let line = three_words();
        render_line(&line, 0.0, 50.0, 100.0, true, &opts(Align::Left), &mut surface);

        let record = surface.into_record();
        assert!(record.pages[0]
            .commands
            .iter()
            .all(|c| c.text != " "));
    }
}
