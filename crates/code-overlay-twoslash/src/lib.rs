#![warn(missing_docs)]
//! `code-overlay-twoslash` - read twoslash analysis payloads into `code-overlay` annotations.
//!
//! A twoslash run over a TypeScript snippet produces a JSON document holding the processed
//! `code` plus `errors`, `staticQuickInfos` and `queries`. Offsets in that document are UTF-16
//! code units; this crate converts them to the `char` offsets `code-overlay` works in.
//!
//! ```rust
//! use code_overlay_twoslash::parse_twoslash_json;
//!
//! let result = parse_twoslash_json(r#"{
//!     "code": "const a = 1",
//!     "staticQuickInfos": [
//!         { "line": 0, "character": 6, "start": 6, "length": 1, "text": "const a: 1" }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(result.quick_infos[0].kind, "lsp");
//! assert_eq!(result.bundle().len(), 1);
//! ```

pub mod utf16;

use code_overlay::{AnnotationBundle, ErrorAnnotation, Query, QueryKind, QuickInfo};
use serde_json::Value;
use thiserror::Error;
use utf16::Utf16Index;

#[derive(Debug, Error)]
/// Errors produced while reading an analysis payload.
pub enum TwoslashParseError {
    #[error("invalid JSON: {0}")]
    /// The input is not valid JSON.
    Json(#[from] serde_json::Error),

    #[error("payload must be a JSON object with a string `code` field")]
    /// The top level is not an object, or `code` is missing.
    MissingCode,

    #[error("`{section}` must be an array")]
    /// An annotation section is present but not an array.
    NotAnArray {
        /// Section name (`errors`, `staticQuickInfos`, `queries`).
        section: &'static str,
    },

    #[error("{section}[{index}]: missing or invalid `{field}`")]
    /// A required field is absent or has the wrong type.
    InvalidField {
        /// Section name.
        section: &'static str,
        /// Position of the entry within its section.
        index: usize,
        /// Field name as spelled in the payload.
        field: &'static str,
    },

    #[error("queries[{index}]: unknown query kind '{kind}'")]
    /// A query entry has a `kind` other than `query` or `completions`.
    UnknownQueryKind {
        /// Position of the entry within `queries`.
        index: usize,
        /// The offending kind.
        kind: String,
    },
}

/// A parsed analysis payload, with every offset expressed in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwoslashResult {
    /// The processed source the annotations refer to.
    pub code: String,
    /// File extension reported by the analysis, if any.
    pub extension: Option<String>,
    /// Diagnostics.
    pub errors: Vec<ErrorAnnotation>,
    /// Hover information.
    pub quick_infos: Vec<QuickInfo>,
    /// Query directives.
    pub queries: Vec<Query>,
}

/// Parse a JSON analysis payload.
pub fn parse_twoslash_json(json: &str) -> Result<TwoslashResult, TwoslashParseError> {
    let value: Value = serde_json::from_str(json)?;
    TwoslashResult::from_value(&value)
}

impl TwoslashResult {
    /// Read an already-decoded payload.
    pub fn from_value(value: &Value) -> Result<Self, TwoslashParseError> {
        let code = value
            .get("code")
            .and_then(Value::as_str)
            .ok_or(TwoslashParseError::MissingCode)?
            .to_string();
        let extension = value
            .get("extension")
            .and_then(Value::as_str)
            .map(str::to_string);

        let cx = Context::new(&code);

        let errors = section(value, "errors")?
            .iter()
            .enumerate()
            .map(|(index, entry)| cx.error(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        let quick_infos = section(value, "staticQuickInfos")?
            .iter()
            .enumerate()
            .map(|(index, entry)| cx.quick_info(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        let queries = section(value, "queries")?
            .iter()
            .enumerate()
            .map(|(index, entry)| cx.query(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "twoslash payload: {} errors, {} quick infos, {} queries",
            errors.len(),
            quick_infos.len(),
            queries.len()
        );

        Ok(Self {
            code,
            extension,
            errors,
            quick_infos,
            queries,
        })
    }

    /// All annotations as a bundle for the renderer.
    pub fn bundle(&self) -> AnnotationBundle {
        AnnotationBundle {
            errors: self.errors.clone(),
            quick_infos: self.quick_infos.clone(),
            queries: self.queries.clone(),
        }
    }

    /// Consume the result, keeping the source and the bundle.
    pub fn into_parts(self) -> (String, AnnotationBundle) {
        let bundle = AnnotationBundle {
            errors: self.errors,
            quick_infos: self.quick_infos,
            queries: self.queries,
        };
        (self.code, bundle)
    }
}

fn section<'v>(value: &'v Value, name: &'static str) -> Result<&'v [Value], TwoslashParseError> {
    match value.get(name) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(TwoslashParseError::NotAnArray { section: name }),
    }
}

/// Offset conversion state for one payload.
struct Context {
    index: Utf16Index,
    lines: Vec<Utf16Index>,
}

impl Context {
    fn new(code: &str) -> Self {
        Self {
            index: Utf16Index::new(code),
            lines: code.split('\n').map(Utf16Index::new).collect(),
        }
    }

    fn span(
        &self,
        section: &'static str,
        index: usize,
        entry: &Value,
    ) -> Result<(usize, usize), TwoslashParseError> {
        let start = usize_field(section, index, entry, "start")?;
        let length = usize_field(section, index, entry, "length")?;
        if start.saturating_add(length) > self.index.utf16_len() {
            log::warn!(
                "{section}[{index}]: span {start}+{length} extends past the end of the code ({} units)",
                self.index.utf16_len()
            );
        }
        Ok(self.index.char_span(start, length))
    }

    fn column(&self, line: usize, utf16_column: usize) -> usize {
        match self.lines.get(line) {
            Some(line) => line.char_offset(utf16_column),
            None => utf16_column,
        }
    }

    fn error(&self, index: usize, entry: &Value) -> Result<ErrorAnnotation, TwoslashParseError> {
        const SECTION: &str = "errors";
        let line = usize_field(SECTION, index, entry, "line")?;
        let character = usize_field(SECTION, index, entry, "character")?;
        let (start, length) = self.span(SECTION, index, entry)?;

        let code = match entry.get("code") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => {
                return Err(TwoslashParseError::InvalidField {
                    section: SECTION,
                    index,
                    field: "code",
                });
            }
        };

        Ok(ErrorAnnotation {
            line,
            character: self.column(line, character),
            start,
            length,
            code,
            rendered_message: str_field(SECTION, index, entry, "renderedMessage")?,
        })
    }

    fn quick_info(&self, index: usize, entry: &Value) -> Result<QuickInfo, TwoslashParseError> {
        const SECTION: &str = "staticQuickInfos";
        let line = usize_field(SECTION, index, entry, "line")?;
        let character = usize_field(SECTION, index, entry, "character")?;
        let (start, length) = self.span(SECTION, index, entry)?;

        Ok(QuickInfo {
            line,
            character: self.column(line, character),
            start,
            length,
            kind: entry
                .get("kind")
                .and_then(Value::as_str)
                .unwrap_or("lsp")
                .to_string(),
            text: str_field(SECTION, index, entry, "text")?,
            docs: entry
                .get("docs")
                .and_then(Value::as_str)
                .filter(|docs| !docs.is_empty())
                .map(str::to_string),
        })
    }

    fn query(&self, index: usize, entry: &Value) -> Result<Query, TwoslashParseError> {
        const SECTION: &str = "queries";
        let kind = entry
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(TwoslashParseError::InvalidField {
                section: SECTION,
                index,
                field: "kind",
            })?;
        let line = usize_field(SECTION, index, entry, "line")?;
        let offset = usize_field(SECTION, index, entry, "offset")?;
        let (start, length) = self.span(SECTION, index, entry)?;

        let kind = match kind {
            "query" => QueryKind::Hover {
                text: entry
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            "completions" => QueryKind::Completions {
                prefix: entry
                    .get("completionsPrefix")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                names: completion_names(index, entry),
            },
            other => {
                return Err(TwoslashParseError::UnknownQueryKind {
                    index,
                    kind: other.to_string(),
                });
            }
        };

        // The query's line is the directive line; its column refers to the line above.
        Ok(Query {
            line,
            offset: self.column(line.saturating_sub(1), offset),
            start,
            length,
            kind,
        })
    }
}

fn completion_names(index: usize, entry: &Value) -> Vec<String> {
    let Some(items) = entry.get("completions").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let name = item.get("name").and_then(Value::as_str);
            if name.is_none() {
                log::warn!("queries[{index}]: skipping completion entry without a name");
            }
            name.map(str::to_string)
        })
        .collect()
}

fn usize_field(
    section: &'static str,
    index: usize,
    entry: &Value,
    field: &'static str,
) -> Result<usize, TwoslashParseError> {
    entry
        .get(field)
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(TwoslashParseError::InvalidField {
            section,
            index,
            field,
        })
}

fn str_field(
    section: &'static str,
    index: usize,
    entry: &Value,
    field: &'static str,
) -> Result<String, TwoslashParseError> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(TwoslashParseError::InvalidField {
            section,
            index,
            field,
        })
}
