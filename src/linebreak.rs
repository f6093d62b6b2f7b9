//! Line breaker – greedy word wrapping with character-level overflow
//! handling.
//!
//! Words accumulate onto the current line while the measured width fits; a
//! word too wide for a whole column is character-split with a hyphenation
//! fallback. A post-pass re-measures every built line and repairs any that
//! still overflow, so no finished line exceeds the available width except
//! when a single character is wider than the column.

use crate::style::{LayoutOptions, Line, Paint, StyledRun};
use crate::surface::{measure_styled, Surface};

/// Fraction of the available width a split fragment may occupy before the
/// cut. Compensates for measurement rounding downstream; pagination math
/// depends on this exact value.
const SPLIT_THRESHOLD: f32 = 0.95;

/// Break styled runs into wrapped lines fitting
/// `max_width - base_indentation * font_size`.
///
/// A run's style travels with each of its words; one explicit separator run
/// is placed between consecutive words on a line.
pub fn break_lines(
    runs: &[StyledRun],
    max_width: f32,
    base_indentation: f32,
    opts: &LayoutOptions,
    surface: &mut dyn Surface,
) -> Vec<Line> {
    let available = max_width - base_indentation * opts.font_size;

    let mut words: Vec<StyledRun> = Vec::new();
    for run in runs {
        for word in run.text.split_whitespace() {
            words.push(StyledRun::new(word, run.style.clone()));
        }
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Line = Vec::new();
    let mut current_width = 0.0f32;

    for word in words {
        let paint = Paint::of(&word.style, opts);
        let word_width = measure_styled(surface, &paint, &word.text);
        let space_width = if current.is_empty() {
            0.0
        } else {
            measure_styled(surface, &paint, " ")
        };

        if current_width + space_width + word_width <= available {
            if !current.is_empty() {
                current.push(StyledRun::separator(word.style.clone()));
                current_width += space_width;
            }
            current_width += word_width;
            current.push(word);
        } else if word_width <= available {
            // Word fits alone on a fresh line.
            lines.push(std::mem::take(&mut current));
            current_width = word_width;
            current.push(word);
        } else {
            // Word too wide for a whole column: commit what we have, then
            // character-split. Every fragment becomes its own line except
            // the last, which starts the next accumulation.
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut fragments = split_word_if_needed(&word.text, &paint, available, surface);
            let last = fragments.pop().unwrap_or_default();
            for fragment in fragments {
                lines.push(vec![StyledRun::new(fragment, word.style.clone())]);
            }
            current_width = measure_styled(surface, &paint, &last);
            current.push(StyledRun::new(last, word.style));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    repair_overflow(&mut lines, available, opts, surface);
    lines
}

/// Split a word that cannot fit the column into measured fragments.
///
/// Characters accumulate until the candidate exceeds 95 % of `available`;
/// the cut emits the accumulated fragment with a trailing hyphen when it has
/// at least two characters, without one when it has exactly one, and emits
/// the offending character alone when even a single character exceeds the
/// threshold.
pub fn split_word_if_needed(
    word: &str,
    paint: &Paint,
    available: f32,
    surface: &mut dyn Surface,
) -> Vec<String> {
    let limit = available * SPLIT_THRESHOLD;
    let mut fragments = Vec::new();
    let mut acc = String::new();

    for ch in word.chars() {
        let mut candidate = acc.clone();
        candidate.push(ch);
        if measure_styled(surface, paint, &candidate) > limit {
            match acc.chars().count() {
                0 => fragments.push(ch.to_string()),
                1 => {
                    fragments.push(std::mem::take(&mut acc));
                    acc.push(ch);
                }
                _ => {
                    acc.push('-');
                    fragments.push(std::mem::take(&mut acc));
                    acc.push(ch);
                }
            }
        } else {
            acc = candidate;
        }
    }
    if !acc.is_empty() {
        fragments.push(acc);
    }
    fragments
}

/// Total measured width of a line under the given options.
pub fn line_width(line: &Line, opts: &LayoutOptions, surface: &mut dyn Surface) -> f32 {
    line.iter()
        .map(|run| {
            let paint = Paint::of(&run.style, opts);
            measure_styled(surface, &paint, &run.text)
        })
        .sum()
}

/// Re-measure every built line and trim any that still exceed the budget.
///
/// Runs are kept while the cumulative width fits; the first overflowing run
/// is re-split against the remaining budget and whatever does not fit is
/// dropped with a `log::warn`. The lone exemption is a single character
/// wider than the whole column, which is kept on an otherwise empty line.
fn repair_overflow(
    lines: &mut [Line],
    available: f32,
    opts: &LayoutOptions,
    surface: &mut dyn Surface,
) {
    for line in lines.iter_mut() {
        if line_width(line, opts, surface) <= available {
            continue;
        }

        let source = std::mem::take(line);
        let mut width = 0.0f32;
        let mut dropped = String::new();
        let mut full = false;

        for run in source {
            if full {
                dropped.push_str(&run.text);
                continue;
            }
            let paint = Paint::of(&run.style, opts);
            let run_width = measure_styled(surface, &paint, &run.text);
            if width + run_width <= available {
                width += run_width;
                line.push(run);
                continue;
            }

            full = true;
            let remaining = available - width;
            let mut fragments = split_word_if_needed(&run.text, &paint, remaining, surface);
            if fragments.is_empty() {
                continue;
            }
            let head = fragments.remove(0);
            let head_width = measure_styled(surface, &paint, &head);
            if head_width <= remaining || line.is_empty() {
                line.push(StyledRun::new(head, run.style));
            } else {
                dropped.push_str(&head);
            }
            for fragment in fragments {
                dropped.push_str(&fragment);
            }
        }

        if !dropped.trim().is_empty() {
            log::warn!("line overflow repair dropped text: {dropped:?}");
        }
    }
}
