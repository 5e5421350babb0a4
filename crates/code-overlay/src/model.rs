//! Token and annotation data model.
//!
//! Two independent producers describe the same source block:
//!
//! - a syntax highlighter, which yields [`Line`]s of colored [`Token`]s
//! - an analysis tool, which yields [`Annotation`]s anchored to character offsets
//!
//! All offsets, columns and lengths are counted in Unicode scalar values (`char`). Annotation
//! `start` offsets are file-absolute (counted from the start of the whole block, line breaks
//! included), while `character` columns are relative to the annotation's own line.

/// A single lexical unit produced by a highlighter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Literal source text covered by this token.
    pub content: String,
    /// Display color (any CSS color value, e.g. `#D4D4D4`).
    pub color: String,
}

impl Token {
    /// Create a new token.
    pub fn new(content: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: color.into(),
        }
    }

    /// Token length in `char`s.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// One source line as an ordered sequence of tokens. An empty line has no tokens.
pub type Line = Vec<Token>;

/// Concatenate the tokens of each line, joining lines with `\n`.
pub fn lines_to_text(lines: &[Line]) -> String {
    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        for token in line {
            out.push_str(&token.content);
        }
    }
    out
}

/// A diagnostic reported by the analysis tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAnnotation {
    /// 0-based line the error is reported on.
    pub line: usize,
    /// Line-relative column of the error start.
    pub character: usize,
    /// File-absolute offset of the error start.
    pub start: usize,
    /// Length of the error span.
    pub length: usize,
    /// Diagnostic identifier (e.g. `2322`).
    pub code: String,
    /// Human-readable message; escaped when rendered.
    pub rendered_message: String,
}

/// Hover information attached to an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickInfo {
    /// 0-based line of the identifier.
    pub line: usize,
    /// Line-relative column of the identifier.
    pub character: usize,
    /// File-absolute offset of the identifier.
    pub start: usize,
    /// Length of the identifier.
    pub length: usize,
    /// Classification tag, rendered as a CSS class.
    pub kind: String,
    /// Hover text; highlighted recursively when rendered.
    pub text: String,
    /// Optional documentation attached to the hover.
    pub docs: Option<String>,
}

/// What a [`Query`] asks to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// `^?`-style query: show the hover text under the caret.
    Hover {
        /// Hover text to display.
        text: String,
    },
    /// `^|`-style query: show a completions dropdown under the caret.
    Completions {
        /// Already-typed prefix used to filter `names`.
        prefix: Option<String>,
        /// Candidate completion names.
        names: Vec<String>,
    },
}

/// An inline directive annotating the line above the one it appears on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// 0-based line the directive appears on; it annotates `line - 1`.
    pub line: usize,
    /// Column of the caret marker.
    pub offset: usize,
    /// File-absolute offset of the queried identifier.
    pub start: usize,
    /// Length of the queried identifier.
    pub length: usize,
    /// Requested display.
    pub kind: QueryKind,
}

/// A semantic fact about a range of the source block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// A diagnostic.
    Error(ErrorAnnotation),
    /// Hover information.
    QuickInfo(QuickInfo),
    /// An inline query directive.
    Query(Query),
}

impl From<ErrorAnnotation> for Annotation {
    fn from(value: ErrorAnnotation) -> Self {
        Self::Error(value)
    }
}

impl From<QuickInfo> for Annotation {
    fn from(value: QuickInfo) -> Self {
        Self::QuickInfo(value)
    }
}

impl From<Query> for Annotation {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}

/// All annotations for one source block, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationBundle {
    /// Diagnostics, in reporting order.
    pub errors: Vec<ErrorAnnotation>,
    /// Hover information, in reporting order.
    pub quick_infos: Vec<QuickInfo>,
    /// Query directives, in source order.
    pub queries: Vec<Query>,
}

impl AnnotationBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotation to the matching list.
    pub fn push(&mut self, annotation: impl Into<Annotation>) {
        match annotation.into() {
            Annotation::Error(e) => self.errors.push(e),
            Annotation::QuickInfo(q) => self.quick_infos.push(q),
            Annotation::Query(q) => self.queries.push(q),
        }
    }

    /// Total number of annotations.
    pub fn len(&self) -> usize {
        self.errors.len() + self.quick_infos.len() + self.queries.len()
    }

    /// Returns `true` if the bundle holds no annotations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A: Into<Annotation>> FromIterator<A> for AnnotationBundle {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for annotation in iter {
            bundle.push(annotation);
        }
        bundle
    }
}
