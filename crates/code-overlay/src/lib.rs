#![warn(missing_docs)]
//! `code-overlay` - fuse syntax highlighting and semantic annotations into static HTML.
//!
//! # Overview
//!
//! A highlighter describes a source block as [`Line`]s of colored [`Token`]s. An analysis tool
//! describes the same block as [`Annotation`]s: errors, hover (quick info) spans and inline
//! query directives, anchored to file-absolute character offsets. This crate merges both into
//! one flat, well-formed markup string per block.
//!
//! ```text
//! tokens + annotations
//!     → per-token decoration ranges      (decorate)
//!     → per-line containers + trailers   (render)
//!     → block markup
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use code_overlay::{
//!     AnnotationBundle, ErrorAnnotation, MonochromeHighlighter, RenderOptions, Token,
//!     render_annotated,
//! };
//!
//! let lines = vec![vec![Token::new("let", "#569CD6"), Token::new(" x", "#D4D4D4")]];
//! let annotations: AnnotationBundle = [ErrorAnnotation {
//!     line: 0,
//!     character: 4,
//!     start: 4,
//!     length: 1,
//!     code: "7005".to_string(),
//!     rendered_message: "Variable 'x' implicitly has an 'any' type.".to_string(),
//! }]
//! .into_iter()
//! .collect();
//!
//! let html = render_annotated(
//!     &lines,
//!     &RenderOptions::new().with_lang_id("ts"),
//!     &annotations,
//!     &MonochromeHighlighter::default(),
//! );
//! assert!(html.contains(r#"<span class="err">x</span>"#));
//! ```
//!
//! # Module Description
//!
//! - [`model`] - tokens, lines and annotations
//! - [`group`] - stable key grouping
//! - [`escape`] - HTML escaping and reserved-marker substitution
//! - [`highlighter`] - the highlighting capability
//! - [`options`] - render configuration
//! - [`decorate`] - decoration ranges and nested wrapping
//! - [`render`] - annotated block renderer
//! - [`plain`] - annotation-free block renderer
//! - [`tsconfig`] - `tsconfig.json` renderer
//!
//! All offsets are counted in Unicode scalar values (`char`).

pub mod decorate;
pub mod escape;
pub mod group;
pub mod highlighter;
pub mod model;
pub mod options;
pub mod plain;
pub mod render;
pub mod tsconfig;
mod tsconfig_options;

pub use decorate::{DecorationRange, wrap_decorations};
pub use escape::{
    escape_html, escape_text, replace_triple_arrow, replace_triple_arrow_encoded,
    sub_triple_arrow,
};
pub use group::group_by;
pub use highlighter::{Highlighter, MonochromeHighlighter};
pub use model::{
    Annotation, AnnotationBundle, ErrorAnnotation, Line, Query, QueryKind, QuickInfo, Token,
    lines_to_text,
};
pub use options::{MisalignedRangePolicy, OptionsError, RenderOptions};
pub use plain::render_plain;
pub use render::{AnnotatedRenderer, RenderedLine, render_annotated};
pub use tsconfig::{TSCONFIG_REFERENCE_URL, render_tsconfig, tsconfig_oneliner};
