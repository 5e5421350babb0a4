//! `code-overlay-highlight-simple` - Simple (regex-based) highlighting for `code-overlay`.
//!
//! This crate is intended for hover text, small snippets and lightweight formats (JSON etc.)
//! where a full grammar engine is unnecessary. It produces the colored token lines consumed by
//! `code-overlay`'s renderers.

use code_overlay::{Highlighter, Line, Token};
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while building highlighting rules.
pub enum HighlightError {
    #[error("regex compile error: {0}")]
    /// A rule pattern failed to compile.
    Regex(#[from] regex::Error),

    #[error("pattern '{pattern}' has no capture group {group}")]
    /// `with_capture_group` referred to a group the pattern does not define.
    InvalidCaptureGroup {
        /// The regex pattern string.
        pattern: String,
        /// The requested group index.
        group: usize,
    },
}

/// A single regex highlighting rule.
#[derive(Debug, Clone)]
pub struct RegexRule {
    regex: Regex,
    color: String,
    capture_group: Option<usize>,
}

impl RegexRule {
    /// Create a rule coloring every match of `pattern` with `color`.
    pub fn new(pattern: &str, color: impl Into<String>) -> Result<Self, HighlightError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            color: color.into(),
            capture_group: None,
        })
    }

    /// Color only a capture group of each match.
    ///
    /// Example (JSON key):
    /// - pattern: `("(?:\\.|[^"\\])*")\s*:`
    /// - capture_group: `1` (the quoted key)
    pub fn with_capture_group(mut self, group: usize) -> Result<Self, HighlightError> {
        if group >= self.regex.captures_len() {
            return Err(HighlightError::InvalidCaptureGroup {
                pattern: self.regex.as_str().to_string(),
                group,
            });
        }
        self.capture_group = Some(group);
        Ok(self)
    }

    /// The color applied to matches.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// First non-empty match (byte range) starting at or after `from`.
    fn find_from(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        let mut at = from;
        while at <= text.len() {
            let (whole_end, found) = match self.capture_group {
                None => {
                    let m = self.regex.find_at(text, at)?;
                    (m.end(), Some((m.start(), m.end())))
                }
                Some(group) => {
                    let caps = self.regex.captures_at(text, at)?;
                    let whole = caps.get(0)?;
                    let found = caps.get(group).map(|m| (m.start(), m.end()));
                    (whole.end(), found)
                }
            };

            if let Some((start, end)) = found
                && start < end
            {
                return Some((start, end));
            }

            // Skip empty matches by at least one char.
            at = if whole_end > at {
                whole_end
            } else {
                next_char_boundary(text, at)?
            };
        }
        None
    }
}

fn next_char_boundary(text: &str, at: usize) -> Option<usize> {
    text[at..].chars().next().map(|c| at + c.len_utf8())
}

/// A simple regex-based syntax highlighter.
///
/// Designed for snippets and simple formats. It is *not* intended to be a full parser: each
/// line is highlighted independently, so multi-line constructs are not recognized.
#[derive(Debug, Clone)]
pub struct RegexHighlighter {
    rules: Vec<RegexRule>,
    default_color: String,
}

impl RegexHighlighter {
    /// Create a highlighter; text not matched by any rule uses `default_color`.
    pub fn new(rules: Vec<RegexRule>, default_color: impl Into<String>) -> Self {
        Self {
            rules,
            default_color: default_color.into(),
        }
    }

    /// The configured rules, in priority order.
    pub fn rules(&self) -> &[RegexRule] {
        &self.rules
    }

    /// Color used for unmatched text.
    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Highlight a single line (without its line break).
    ///
    /// The earliest match wins; ties go to the rule listed first. Unmatched gaps become
    /// default-colored tokens, so the token contents always concatenate back to `line`.
    pub fn highlight_line(&self, line: &str) -> Line {
        let mut tokens: Line = Vec::new();
        let mut pos = 0usize;

        while pos < line.len() {
            let best = self
                .rules
                .iter()
                .filter_map(|rule| rule.find_from(line, pos).map(|range| (range, rule)))
                .min_by_key(|((start, _), _)| *start);

            let Some(((start, end), rule)) = best else {
                push_token(&mut tokens, &line[pos..], &self.default_color);
                break;
            };

            if start > pos {
                push_token(&mut tokens, &line[pos..start], &self.default_color);
            }
            push_token(&mut tokens, &line[start..end], &rule.color);
            pos = end;
        }

        tokens
    }

    /// A small TypeScript/JavaScript grammar (comments, strings, numbers, keywords, types).
    pub fn typescript_default(colors: TypeScriptColors) -> Result<Self, HighlightError> {
        Ok(Self::new(
            vec![
                RegexRule::new(r"//.*$", colors.comment.clone())?,
                RegexRule::new(r"/\*.*?\*/", colors.comment)?,
                RegexRule::new(
                    r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|`(?:\\.|[^`\\])*`"#,
                    colors.string,
                )?,
                RegexRule::new(r"\b\d+(?:\.\d+)?\b", colors.number)?,
                RegexRule::new(
                    r"\b(?:as|async|await|break|case|catch|class|const|continue|declare|default|do|else|enum|export|extends|false|finally|for|from|function|if|implements|import|in|instanceof|interface|keyof|let|namespace|new|null|of|private|protected|public|readonly|return|static|super|switch|this|throw|true|try|type|typeof|undefined|var|void|while|yield)\b",
                    colors.keyword,
                )?,
                RegexRule::new(r"\b[A-Z][A-Za-z0-9_]*\b", colors.type_name)?,
                RegexRule::new(r"\b[A-Za-z_$][A-Za-z0-9_$]*\b", colors.identifier)?,
            ],
            colors.plain,
        ))
    }

    /// A small JSON grammar (keys, strings, numbers, booleans, null).
    pub fn json_default(colors: JsonColors) -> Result<Self, HighlightError> {
        Ok(Self::new(
            vec![
                RegexRule::new(r#"("(?:\\.|[^"\\])*")\s*:"#, colors.key)?.with_capture_group(1)?,
                RegexRule::new(r#""(?:\\.|[^"\\])*""#, colors.string)?,
                RegexRule::new(r"-?(?:0|[1-9]\d*)(?:\.\d+)?(?:[eE][+-]?\d+)?", colors.number)?,
                RegexRule::new(r"\b(?:true|false|null)\b", colors.keyword)?,
            ],
            colors.plain,
        ))
    }
}

impl Highlighter for RegexHighlighter {
    fn highlight(&self, code: &str, _lang: &str) -> Vec<Line> {
        code.split('\n').map(|line| self.highlight_line(line)).collect()
    }
}

fn push_token(tokens: &mut Line, text: &str, color: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = tokens.last_mut()
        && last.color == color
    {
        last.content.push_str(text);
        return;
    }
    tokens.push(Token::new(text, color));
}

/// Regex highlighters keyed by language id, with aliases.
///
/// Unknown languages fall back to one default-colored token per line.
#[derive(Debug, Clone)]
pub struct HighlighterSet {
    by_lang: HashMap<String, RegexHighlighter>,
    aliases: HashMap<String, String>,
    fallback_color: String,
}

impl HighlighterSet {
    /// Create an empty set.
    pub fn new(fallback_color: impl Into<String>) -> Self {
        Self {
            by_lang: HashMap::new(),
            aliases: HashMap::new(),
            fallback_color: fallback_color.into(),
        }
    }

    /// A set with the built-in TypeScript and JSON grammars and their common aliases.
    pub fn with_defaults() -> Result<Self, HighlightError> {
        let colors = TypeScriptColors::default();
        let mut set = Self::new(colors.plain.clone());
        set.insert("typescript", RegexHighlighter::typescript_default(colors)?);
        set.insert("json", RegexHighlighter::json_default(JsonColors::default())?);
        for alias in ["ts", "tsx", "js", "jsx", "javascript"] {
            set.alias(alias, "typescript");
        }
        set.alias("jsonc", "json");
        Ok(set)
    }

    /// Register (or replace) the highlighter for `lang`.
    pub fn insert(&mut self, lang: impl Into<String>, highlighter: RegexHighlighter) {
        self.by_lang.insert(lang.into(), highlighter);
    }

    /// Make `alias` resolve to `lang`.
    pub fn alias(&mut self, alias: impl Into<String>, lang: impl Into<String>) {
        self.aliases.insert(alias.into(), lang.into());
    }

    /// Look up the highlighter for a language id or alias.
    pub fn get(&self, lang: &str) -> Option<&RegexHighlighter> {
        let lang = self.aliases.get(lang).map(String::as_str).unwrap_or(lang);
        self.by_lang.get(lang)
    }
}

impl Highlighter for HighlighterSet {
    fn highlight(&self, code: &str, lang: &str) -> Vec<Line> {
        match self.get(lang) {
            Some(highlighter) => highlighter.highlight(code, lang),
            None => code
                .split('\n')
                .map(|line| {
                    let mut tokens = Vec::new();
                    push_token(&mut tokens, line, &self.fallback_color);
                    tokens
                })
                .collect(),
        }
    }
}

/// Colors for [`RegexHighlighter::typescript_default`] (Dark+ palette by default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScriptColors {
    pub plain: String,
    pub comment: String,
    pub string: String,
    pub number: String,
    pub keyword: String,
    pub type_name: String,
    pub identifier: String,
}

impl Default for TypeScriptColors {
    fn default() -> Self {
        Self {
            plain: "#D4D4D4".to_string(),
            comment: "#6A9955".to_string(),
            string: "#CE9178".to_string(),
            number: "#B5CEA8".to_string(),
            keyword: "#569CD6".to_string(),
            type_name: "#4EC9B0".to_string(),
            identifier: "#9CDCFE".to_string(),
        }
    }
}

/// Colors for [`RegexHighlighter::json_default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonColors {
    pub plain: String,
    pub key: String,
    pub string: String,
    pub number: String,
    pub keyword: String,
}

impl Default for JsonColors {
    fn default() -> Self {
        Self {
            plain: "#D4D4D4".to_string(),
            key: "#9CDCFE".to_string(),
            string: "#CE9178".to_string(),
            number: "#B5CEA8".to_string(),
            keyword: "#569CD6".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use code_overlay::lines_to_text;
    use pretty_assertions::assert_eq;

    fn ts() -> RegexHighlighter {
        RegexHighlighter::typescript_default(TypeScriptColors::default()).unwrap()
    }

    #[test]
    fn test_typescript_tokens_reconstruct_source() {
        let code = "const a: Foo<string> = \"x // y\" // tail\n\nlet n = 1.5 /* c */ + b";
        let lines = ts().highlight(code, "ts");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
        assert_eq!(lines_to_text(&lines), code);
    }

    #[test]
    fn test_earliest_match_wins() {
        let line = ts().highlight_line(r#"s = "// not a comment""#);
        let string = line.iter().find(|t| t.content.starts_with('"')).unwrap();
        assert_eq!(string.content, r#""// not a comment""#);
        assert_eq!(string.color, "#CE9178");
    }

    #[test]
    fn test_keywords_and_types_are_colored() {
        let colors = TypeScriptColors::default();
        let line = ts().highlight_line("interface Point {}");
        assert_eq!(
            line,
            vec![
                Token::new("interface", colors.keyword.as_str()),
                Token::new(" ", colors.plain.as_str()),
                Token::new("Point", colors.type_name.as_str()),
                Token::new(" {}", colors.plain.as_str()),
            ]
        );
    }

    #[test]
    fn test_json_capture_group_colors_key_only() {
        let colors = JsonColors::default();
        let hl = RegexHighlighter::json_default(colors.clone()).unwrap();
        let line = hl.highlight_line(r#"{ "key": "value", "n": 12 }"#);

        assert!(line.iter().any(|t| t.content == "\"key\"" && t.color == colors.key));
        assert!(line.iter().any(|t| t.content == "\"value\"" && t.color == colors.string));
        assert!(line.iter().any(|t| t.content == "12" && t.color == colors.number));
        assert_eq!(
            line.iter().map(|t| t.content.as_str()).collect::<String>(),
            r#"{ "key": "value", "n": 12 }"#
        );
    }

    #[test]
    fn test_invalid_capture_group_is_rejected() {
        let err = RegexRule::new("a(b)", "#fff")
            .unwrap()
            .with_capture_group(2)
            .unwrap_err();
        assert!(matches!(err, HighlightError::InvalidCaptureGroup { group: 2, .. }));
    }

    #[test]
    fn test_bad_pattern_is_reported() {
        assert!(matches!(
            RegexRule::new("(", "#fff"),
            Err(HighlightError::Regex(_))
        ));
    }

    #[test]
    fn test_empty_matches_do_not_loop() {
        let hl = RegexHighlighter::new(vec![RegexRule::new("x*", "#f00").unwrap()], "#fff");
        let line = hl.highlight_line("abxxc");
        assert_eq!(
            line,
            vec![
                Token::new("ab", "#fff"),
                Token::new("xx", "#f00"),
                Token::new("c", "#fff"),
            ]
        );
    }

    #[test]
    fn test_set_resolves_aliases_and_falls_back() {
        let set = HighlighterSet::with_defaults().unwrap();
        assert!(set.get("ts").is_some());
        assert!(set.get("jsonc").is_some());
        assert!(set.get("rust").is_none());

        let lines = set.highlight("fn main() {}\n", "rust");
        assert_eq!(lines, vec![vec![Token::new("fn main() {}", "#D4D4D4")], vec![]]);
    }
}
