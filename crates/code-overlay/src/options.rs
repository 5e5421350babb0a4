//! Render configuration.

use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// What to do with a decoration whose range falls outside the token it was matched to.
///
/// This happens when an annotation was cut at a block boundary, so its file-absolute offset no
/// longer lines up with the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MisalignedRangePolicy {
    /// Clamp the range to the token; drop it if nothing is left.
    #[default]
    Clip,
    /// Drop the decoration entirely.
    Drop,
}

#[derive(Debug, Error)]
/// Errors produced while loading [`RenderOptions`].
pub enum OptionsError {
    #[error("invalid render options: {0}")]
    /// The JSON payload could not be decoded.
    Json(#[from] serde_json::Error),

    #[error("line numbers are 1-based, got 0")]
    /// A line highlight referred to line `0`.
    ZeroLineHighlight,
}

/// Options for a single rendered block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Language label shown in the block header.
    pub lang_id: Option<String>,
    /// File name shown in the block header.
    pub file_name: Option<String>,
    /// Language used to highlight hover text. Falls back to `lang_id`.
    pub quick_info_lang: Option<String>,
    /// 1-based line numbers to emphasize. Empty means "no emphasis".
    pub line_highlights: BTreeSet<usize>,
    /// Handling of decorations that do not line up with their token.
    pub misaligned_ranges: MisalignedRangePolicy,
}

impl RenderOptions {
    /// Default options: no header, no line emphasis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object such as `{"langId": "ts", "lineHighlights": [2]}`.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        if options.line_highlights.contains(&0) {
            return Err(OptionsError::ZeroLineHighlight);
        }
        Ok(options)
    }

    /// Set the language label.
    pub fn with_lang_id(mut self, lang_id: impl Into<String>) -> Self {
        self.lang_id = Some(lang_id.into());
        self
    }

    /// Set the file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the language used for hover text.
    pub fn with_quick_info_lang(mut self, lang: impl Into<String>) -> Self {
        self.quick_info_lang = Some(lang.into());
        self
    }

    /// Emphasize the given 1-based lines; all others are dimmed.
    pub fn with_line_highlights(mut self, lines: impl IntoIterator<Item = usize>) -> Self {
        self.line_highlights = lines.into_iter().collect();
        self
    }

    /// Set the misaligned-range policy.
    pub fn with_misaligned_ranges(mut self, policy: MisalignedRangePolicy) -> Self {
        self.misaligned_ranges = policy;
        self
    }

    /// Language passed to the highlighter for hover text.
    pub fn hover_lang(&self) -> &str {
        self.quick_info_lang
            .as_deref()
            .or(self.lang_id.as_deref())
            .unwrap_or("text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_camel_case() {
        let options = RenderOptions::from_json(
            r#"{"langId": "ts", "fileName": "index.ts", "lineHighlights": [3, 1], "misalignedRanges": "drop"}"#,
        )
        .unwrap();

        assert_eq!(options.lang_id.as_deref(), Some("ts"));
        assert_eq!(options.file_name.as_deref(), Some("index.ts"));
        assert_eq!(options.line_highlights.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(options.misaligned_ranges, MisalignedRangePolicy::Drop);
    }

    #[test]
    fn test_from_json_defaults() {
        let options = RenderOptions::from_json("{}").unwrap();
        assert_eq!(options, RenderOptions::default());
        assert_eq!(options.hover_lang(), "text");
    }

    #[test]
    fn test_from_json_rejects_line_zero() {
        let err = RenderOptions::from_json(r#"{"lineHighlights": [0]}"#).unwrap_err();
        assert!(matches!(err, OptionsError::ZeroLineHighlight));
    }

    #[test]
    fn test_hover_lang_fallbacks() {
        let options = RenderOptions::new().with_lang_id("ts");
        assert_eq!(options.hover_lang(), "ts");
        let options = options.with_quick_info_lang("typescript");
        assert_eq!(options.hover_lang(), "typescript");
    }
}
