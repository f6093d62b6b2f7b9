//! PDF renderer – takes a [`LayoutRecord`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).
//!
//! The recorded commands carry their full paint state, so this adapter is
//! the only place that talks to printpdf's stateful font API.

use printpdf::*;

use crate::surface::{DrawCommand, LayoutRecord};

/// Render a recorded layout into PDF bytes.
pub fn render_pdf(record: &LayoutRecord) -> Result<Vec<u8>, String> {
    let page_w = Mm(record.page_width_pt * 0.352778); // pt → mm
    let page_h = Mm(record.page_height_pt * 0.352778);

    let mut doc = PdfDocument::new(&record.title);

    let mut pages = Vec::new();
    for page_record in &record.pages {
        let mut ops = Vec::new();
        for command in &page_record.commands {
            render_command(&mut ops, command, record.page_height_pt);
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // Ensure at least one page.
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());

    Ok(bytes)
}

/// Emit one recorded text command as printpdf ops.
///
/// The layout cursor uses a top-left origin with y at the text baseline;
/// PDF's origin is bottom-left, so only the y axis flips.
fn render_command(ops: &mut Vec<Op>, command: &DrawCommand, page_height: f32) {
    if command.text.is_empty() {
        return;
    }
    let font = builtin_font(command.bold, command.italic);
    let pdf_y = page_height - command.y;

    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(command.x),
            y: Pt(pdf_y),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(command.font_size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(to_winlatin(&command.text))],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Builtin Helvetica variant for a weight/slant pair. Recorded families all
/// map onto the builtin set; embedding arbitrary TTFs stays out of scope.
fn builtin_font(bold: bool, italic: bool) -> BuiltinFont {
    match (bold, italic) {
        (true, true) => BuiltinFont::HelveticaBoldOblique,
        (true, false) => BuiltinFont::HelveticaBold,
        (false, true) => BuiltinFont::HelveticaOblique,
        (false, false) => BuiltinFont::Helvetica,
    }
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF).
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{201A}' => 0x82, // single low-9 quote
            '\u{201E}' => 0x84, // double low-9 quote
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{2122}' => 0x99, // trademark
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for 0x80-0x9F range; printpdf passes
    // these bytes straight to the PDF stream, decoded by WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}
