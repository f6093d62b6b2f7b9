//! # ebook-press – markup-driven ebook text layout and pagination
//!
//! This crate lays lightweight-markup text onto fixed-size pages and renders
//! the result as PDF. The pipeline stages are:
//!
//! 1. **Parse** – inline markup → styled runs ([`markup`])
//! 2. **Break** – greedy word wrapping with character-split overflow
//!    handling ([`linebreak`])
//! 3. **Place** – justification and alignment offsets per line ([`layout`])
//! 4. **Flow** – cursor advancement and page-break requests
//!    ([`pagination`]), with table-of-contents documents detoured through
//!    the dotted-leader formatter ([`toc`])
//! 5. **Render** – recorded draw commands → PDF bytes via printpdf
//!    ([`render`])
//!
//! All measurement goes through the host [`surface::Surface`], backed by
//! `ttf-parser` glyph metrics ([`fonts`]).

pub mod fonts;
pub mod layout;
pub mod linebreak;
pub mod markup;
pub mod pagination;
pub mod pipeline;
pub mod render;
pub mod style;
pub mod surface;
pub mod templates;
pub mod toc;

// Re-exports for convenience
pub use pagination::{layout_text, Margins};
pub use pipeline::{generate_pdf, generate_pdf_from_markup, PageOrientation};
pub use style::{Align, LayoutOptions, StyledRun, TextStyle};
