//! The highlighting capability consumed by the renderers.

use crate::model::Line;

/// Turns source text into colored token lines.
///
/// Implementations must be pure: renderers call back into the highlighter while a block is
/// being rendered (e.g. for hover text), and expect no state to leak between calls.
pub trait Highlighter {
    /// Highlight `code` written in `lang`.
    ///
    /// Concatenating the tokens of every returned line, joined with `\n`, must reproduce `code`.
    fn highlight(&self, code: &str, lang: &str) -> Vec<Line>;
}

impl<F> Highlighter for F
where
    F: Fn(&str, &str) -> Vec<Line>,
{
    fn highlight(&self, code: &str, lang: &str) -> Vec<Line> {
        self(code, lang)
    }
}

/// A highlighter that colors every line with a single color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonochromeHighlighter {
    color: String,
}

impl MonochromeHighlighter {
    /// Create a highlighter that uses `color` for every token.
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
        }
    }
}

impl Default for MonochromeHighlighter {
    fn default() -> Self {
        Self::new("#D4D4D4")
    }
}

impl Highlighter for MonochromeHighlighter {
    fn highlight(&self, code: &str, _lang: &str) -> Vec<Line> {
        code.split('\n')
            .map(|line| {
                if line.is_empty() {
                    Vec::new()
                } else {
                    vec![crate::model::Token::new(line, self.color.as_str())]
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Token, lines_to_text};

    #[test]
    fn test_closure_highlighter() {
        let hl = |code: &str, lang: &str| vec![vec![Token::new(code, lang)]];
        let lines = hl.highlight("x", "ts");
        assert_eq!(lines, vec![vec![Token::new("x", "ts")]]);
    }

    #[test]
    fn test_monochrome_reconstructs_source() {
        let code = "a\n\nb c\n";
        let lines = MonochromeHighlighter::default().highlight(code, "text");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].is_empty());
        assert_eq!(lines_to_text(&lines), code);
    }
}
