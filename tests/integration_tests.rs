//! Integration tests for the ebook-press pipeline.
//!
//! These tests validate:
//! - Recorded draw commands match expected positions
//! - PDF output exists and has valid format
//! - All supported line shapes produce correct output
//! - Pagination and table-of-contents routing work end to end

use ebook_press::fonts::FontManager;
use ebook_press::pagination::{layout_text, Margins};
use ebook_press::pipeline::{compute_layout_record, generate_pdf, PipelineConfig};
use ebook_press::style::{Align, LayoutOptions};
use ebook_press::surface::{LayoutRecord, RecordingSurface};
use ebook_press::templates;

// =====================================================================
// Helpers
// =====================================================================

fn default_config() -> PipelineConfig {
    PipelineConfig::default()
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 100, "PDF too small: {} bytes", bytes.len());
    assert_eq!(&bytes[0..5], b"%PDF-", "Missing PDF header");
}

/// Heuristic width of a recorded command, matching the builtin metrics.
fn command_width(command: &ebook_press::surface::DrawCommand) -> f32 {
    let fonts = FontManager::default();
    fonts.measure_text_width(
        &command.text,
        command.font_size,
        command.bold,
        command.italic,
        &command.font_family,
    )
}

// =====================================================================
// Pipeline output
// =====================================================================

#[test]
fn chapter_template_renders_valid_pdf() {
    let (bytes, record) = generate_pdf(templates::chapter_template(), &default_config()).unwrap();
    assert_valid_pdf(&bytes);
    assert!(!record.pages.is_empty());
}

#[test]
fn toc_template_renders_valid_pdf() {
    let (bytes, _) = generate_pdf(templates::toc_template(), &default_config()).unwrap();
    assert_valid_pdf(&bytes);
}

#[test]
fn long_documents_paginate() {
    let mut markup = String::new();
    for i in 0..120 {
        markup.push_str(&format!("Paragraf nomor {i} dengan beberapa kata isi.\n\n"));
    }
    let record = compute_layout_record(&markup, &default_config());
    assert!(
        record.pages.len() > 1,
        "Expected multiple pages, got {}",
        record.pages.len()
    );
}

#[test]
fn record_round_trips_as_json() {
    let record = compute_layout_record("# Judul\n\nIsi singkat.", &default_config());
    let json = record.to_json();
    let back = LayoutRecord::from_json(&json).unwrap();
    assert_eq!(back.pages.len(), record.pages.len());
}

// =====================================================================
// Layout positions
// =====================================================================

#[test]
fn headings_record_scaled_bold_commands() {
    let record = compute_layout_record("## Tinjauan", &default_config());
    let command = &record.pages[0].commands[0];
    assert_eq!(command.text, "Tinjauan");
    assert!(command.bold);
    // Default paragraph size 12 × (2.5 - 2 × 0.3) = 22.8.
    assert!((command.font_size - 22.8).abs() < 1e-3);
}

#[test]
fn no_command_escapes_the_column() {
    let config = default_config();
    let record = compute_layout_record(templates::chapter_template(), &config);
    let right_edge = config.page_margin + (config.page_width - 2.0 * config.page_margin);
    for page in &record.pages {
        for command in &page.commands {
            assert!(
                command.x + command_width(command) <= right_edge + 1e-2,
                "{:?} at x={} escapes the column",
                command.text,
                command.x
            );
        }
    }
}

#[test]
fn justified_paragraphs_fill_the_column() {
    // Default paragraph typography justifies; a long run of equal words
    // produces several full lines whose last word must land flush right.
    let config = default_config();
    let markup = "kata ".repeat(60);
    let record = compute_layout_record(markup.trim(), &config);

    let commands = &record.pages[0].commands;
    let first_y = commands[0].y;
    let first_line: Vec<_> = commands.iter().filter(|c| c.y == first_y).collect();
    assert!(first_line.len() > 1);

    let line_end = first_line
        .iter()
        .map(|c| c.x + command_width(c))
        .fold(0.0f32, f32::max);
    let right_edge = config.page_margin + (config.page_width - 2.0 * config.page_margin);
    // The paragraph tier indents by 0.25 × font size; the stretched line
    // still ends flush with the column.
    assert!(
        (line_end - right_edge).abs() < 0.1,
        "justified line ends at {line_end}, column at {right_edge}"
    );
}

#[test]
fn cursor_chains_across_layout_calls() {
    let mut surface = RecordingSurface::a4(40.0);
    let margins = Margins::default();
    let opts = LayoutOptions {
        max_width: 515.28,
        align: Align::Left,
        ..LayoutOptions::default()
    };

    let after_first = layout_text("paragraf pertama", &opts, 40.0, &margins, &mut surface);
    let after_second = layout_text("paragraf kedua", &opts, after_first, &margins, &mut surface);
    assert!(after_second > after_first);

    let record = surface.into_record();
    let commands = &record.pages[0].commands;
    let first_y = commands.first().unwrap().y;
    let last_y = commands.last().unwrap().y;
    assert!(last_y > first_y);
    assert_eq!(last_y, after_second);
}

// =====================================================================
// Table-of-contents routing
// =====================================================================

#[test]
fn toc_layout_emits_leaders_and_numbers() {
    let config = default_config();
    let record = compute_layout_record(templates::toc_template(), &config);

    let commands = &record.pages[0].commands;
    let dot_count = commands.iter().filter(|c| c.text == ".").count();
    assert!(dot_count > 10, "expected dotted leaders, got {dot_count}");

    // Page numbers sit right-aligned against the 20-unit right margin.
    let number = commands.iter().find(|c| c.text == "42").unwrap();
    let number_end = number.x + command_width(number);
    assert!((number_end - (config.page_width - 20.0)).abs() < 1e-2);

    // Chapter prefixes render bold, sub-chapter entries do not.
    assert!(commands.iter().any(|c| c.text == "Bab 1" && c.bold));
    assert!(commands.iter().any(|c| c.text == "1.1" && !c.bold));
}

#[test]
fn chapter_text_without_labels_uses_normal_flow() {
    let record = compute_layout_record("Bab 1 Pendahuluan", &default_config());
    let commands = &record.pages[0].commands;
    assert!(commands.iter().all(|c| c.text != "."));
    assert_eq!(commands[0].text, "Bab");
}

// =====================================================================
// Page breaks
// =====================================================================

#[test]
fn page_break_resumes_at_top_margin() {
    let mut surface = RecordingSurface::new(210.0, 297.0, 20.0);
    let margins = Margins::uniform(20.0);
    let opts = LayoutOptions {
        max_width: 170.0,
        font_size: 5.0,
        line_height: 1.4,
        ..LayoutOptions::default()
    };

    let end = layout_text("baris terakhir", &opts, 290.0, &margins, &mut surface);
    assert_eq!(end, 20.0);
    assert_eq!(surface.new_page_requests(), 1);

    let record = surface.into_record();
    for page in &record.pages {
        for command in &page.commands {
            assert!(command.y <= 277.0);
        }
    }
}
