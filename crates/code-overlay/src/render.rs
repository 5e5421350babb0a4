//! Annotated block rendering.
//!
//! Merges two views of the same source block into one flat markup tree:
//!
//! 1. highlighted [`Line`]s, positioned by line and by token within the line
//! 2. an [`AnnotationBundle`], positioned by file-absolute offset (and line-relative column)
//!
//! The renderer walks lines and tokens while carrying a file-absolute cursor (`file_pos`, the
//! offset of the next token) and a line-relative one (`token_pos`). Annotations are matched to a
//! token by column, then re-expressed relative to `file_pos` so their boundaries split the
//! token text at the right places.
//!
//! Blocks can be cut or stitched together from several files, so an annotation's absolute
//! offset does not always agree with the rendered text. Such decorations are handled per
//! [`MisalignedRangePolicy`](crate::MisalignedRangePolicy).

use crate::decorate::{DecorationRange, wrap_decorations};
use crate::escape::{escape_text, replace_triple_arrow_encoded, token_text};
use crate::group::group_by;
use crate::highlighter::Highlighter;
use crate::model::{AnnotationBundle, ErrorAnnotation, Line, Query, QueryKind, QuickInfo, Token};
use crate::options::RenderOptions;
use crate::plain::{render_plain, trim_trailing_newlines};
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthChar;

/// Render `lines` with `annotations` overlaid.
///
/// `highlighter` is used to highlight quick-info hover text.
pub fn render_annotated(
    lines: &[Line],
    options: &RenderOptions,
    annotations: &AnnotationBundle,
    highlighter: &dyn Highlighter,
) -> String {
    AnnotatedRenderer::new(options, annotations, highlighter).render(lines)
}

/// Markup for one line, plus the file-absolute cursor after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Line markup. Source text is still marker-protected (see [`crate::escape`]).
    pub html: String,
    /// File-absolute offset of the first token of the next line.
    pub file_pos: usize,
}

#[derive(Debug, Clone, Copy)]
enum Matched<'a> {
    Error(&'a ErrorAnnotation),
    QuickInfo(&'a QuickInfo),
    Query(&'a Query),
}

impl Matched<'_> {
    fn start(&self) -> usize {
        match self {
            Self::Error(e) => e.start,
            Self::QuickInfo(q) => q.start,
            Self::Query(q) => q.start,
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Error(e) => e.length,
            Self::QuickInfo(q) => q.length,
            Self::Query(q) => q.length,
        }
    }

    fn column(&self) -> usize {
        match self {
            Self::Error(e) => e.character,
            Self::QuickInfo(q) => q.character,
            Self::Query(q) => q.offset,
        }
    }
}

/// Annotations reported for a single line.
#[derive(Debug, Clone, Copy)]
struct LineAnnotations<'a, 'b> {
    errors: &'b [&'a ErrorAnnotation],
    quick_infos: &'b [&'a QuickInfo],
    queries: &'b [&'a Query],
}

/// Renders one block; annotations are grouped by line once, up front.
pub struct AnnotatedRenderer<'a> {
    options: &'a RenderOptions,
    highlighter: &'a dyn Highlighter,
    errors: BTreeMap<usize, Vec<&'a ErrorAnnotation>>,
    quick_infos: BTreeMap<usize, Vec<&'a QuickInfo>>,
    queries: BTreeMap<usize, Vec<&'a Query>>,
}

impl<'a> AnnotatedRenderer<'a> {
    /// Prepare a renderer for one block.
    pub fn new(
        options: &'a RenderOptions,
        annotations: &'a AnnotationBundle,
        highlighter: &'a dyn Highlighter,
    ) -> Self {
        // A query always describes the line above it.
        let queries = group_by(
            annotations.queries.iter().filter(|q| {
                if q.line == 0 {
                    log::warn!("query at offset {} on line 0 has no line above it", q.offset);
                }
                q.line > 0
            }),
            |q| q.line - 1,
        );

        Self {
            options,
            highlighter,
            errors: group_by(annotations.errors.iter(), |e| e.line),
            quick_infos: group_by(annotations.quick_infos.iter(), |q| q.line),
            queries,
        }
    }

    /// Render the whole block.
    pub fn render(&self, lines: &[Line]) -> String {
        let mut html = String::from("<pre class=\"shiki shiki--twoslash shiki--lsp\">");
        html.push_str(&self.header());
        html.push_str("<div class=\"shiki__code\"><code>");

        let (mut body, file_pos) =
            lines
                .iter()
                .enumerate()
                .fold((String::new(), 0usize), |(mut body, file_pos), (idx, line)| {
                    let rendered = self.render_line(idx, line, file_pos);
                    body.push_str(&rendered.html);
                    (body, rendered.file_pos)
                });
        log::debug!(
            "rendered {} lines ({} chars of source) with {} errors, {} quick infos",
            lines.len(),
            file_pos,
            self.errors.values().map(Vec::len).sum::<usize>(),
            self.quick_infos.values().map(Vec::len).sum::<usize>(),
        );

        trim_trailing_newlines(&mut body);
        html.push_str(&replace_triple_arrow_encoded(&body));
        html.push_str("</code></div></pre>");
        html
    }

    /// Render line `idx`, whose first token sits at file-absolute offset `file_pos`.
    pub fn render_line(&self, idx: usize, line: &Line, file_pos: usize) -> RenderedLine {
        let annotations = LineAnnotations {
            errors: self.errors.get(&idx).map(Vec::as_slice).unwrap_or_default(),
            quick_infos: self
                .quick_infos
                .get(&idx)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            queries: self.queries.get(&idx).map(Vec::as_slice).unwrap_or_default(),
        };

        let (mut html, file_pos) = if line.is_empty() {
            // A leading blank line is structural; it has no counterpart in the analysed text.
            if idx == 0 {
                (String::new(), file_pos)
            } else {
                ("\n".to_string(), file_pos + 1)
            }
        } else {
            let (tokens, _, file_pos) = line.iter().fold(
                (String::new(), 0usize, file_pos),
                |(mut tokens, token_pos, file_pos), token| {
                    tokens.push_str(&self.render_token(token, token_pos, file_pos, annotations));
                    let len = token.char_len();
                    (tokens, token_pos + len, file_pos + len)
                },
            );
            (self.wrap_line(idx, &tokens), file_pos + 1)
        };

        if !annotations.errors.is_empty() {
            html.push_str(&render_errors(annotations.errors));
        }

        if !annotations.queries.is_empty() {
            for query in annotations.queries {
                html.push_str(&render_query(query, line));
            }
            html.push('\n');
        }

        RenderedLine { html, file_pos }
    }

    fn header(&self) -> String {
        if self.options.lang_id.is_none() && self.options.file_name.is_none() {
            return String::new();
        }

        let mut html = String::from("<div class=\"shiki__meta\">");
        if let Some(lang_id) = &self.options.lang_id {
            html.push_str(&format!(
                "<div class=\"shiki__language\">{}</div>",
                escape_text(lang_id)
            ));
        }
        if let Some(file_name) = &self.options.file_name {
            html.push_str(&format!(
                "<div class=\"shiki__filename\">{}</div>",
                escape_text(file_name)
            ));
        }
        html.push_str("</div>");
        html
    }

    fn render_token(
        &self,
        token: &Token,
        token_pos: usize,
        file_pos: usize,
        annotations: LineAnnotations<'a, '_>,
    ) -> String {
        let len = token.char_len();
        let inside = |m: &Matched<'_>| {
            token_pos <= m.column() && token_pos + len >= m.column() + m.length()
        };

        let mut matched: Vec<Matched<'a>> = annotations
            .errors
            .iter()
            .copied()
            .map(Matched::Error)
            .chain(annotations.quick_infos.iter().copied().map(Matched::QuickInfo))
            .chain(annotations.queries.iter().copied().map(Matched::Query))
            .filter(inside)
            .collect();
        matched.sort_by_key(|m| m.start());

        let content = if matched.is_empty() {
            token_text(&token.content)
        } else {
            let ranges: Vec<DecorationRange> = matched
                .iter()
                .filter_map(|m| self.decoration(m, file_pos))
                .collect();
            wrap_decorations(&token.content, &ranges, self.options.misaligned_ranges)
        };

        format!(
            "<div class=\"shiki__token\" style=\"color: {}\">{}</div>",
            escape_text(&token.color),
            content
        )
    }

    fn decoration(&self, matched: &Matched<'_>, file_pos: usize) -> Option<DecorationRange> {
        let begin = matched.start() as isize - file_pos as isize;
        let end = begin + matched.length() as isize;

        match matched {
            Matched::Error(_) => Some(DecorationRange::new(begin, end, "err")),
            Matched::QuickInfo(info) => {
                let lines = self
                    .highlighter
                    .highlight(&info.text, self.options.hover_lang());
                let mut hover = render_plain(&lines, &RenderOptions::new());
                if let Some(docs) = &info.docs {
                    hover.push_str(&format!(
                        "<div class=\"lsp-docs\">{}</div>",
                        escape_text(docs)
                    ));
                }
                Some(DecorationRange::new(begin, end, info.kind.as_str()).with_hover(hover))
            }
            // Queries are rendered after the line, not inline.
            Matched::Query(_) => None,
        }
    }

    fn wrap_line(&self, idx: usize, tokens: &str) -> String {
        let highlights = &self.options.line_highlights;
        let class = if highlights.is_empty() {
            "shiki__line"
        } else if highlights.contains(&(idx + 1)) {
            "shiki__highlight"
        } else {
            "shiki__dim"
        };
        format!("<div class=\"{class}\">{tokens}</div>")
    }
}

fn render_errors(errors: &[&ErrorAnnotation]) -> String {
    let codes = errors
        .iter()
        .map(|e| escape_text(&e.code))
        .collect::<Vec<_>>()
        .join("<br/>");
    let messages = errors
        .iter()
        .map(|e| escape_text(&e.rendered_message))
        .collect::<Vec<_>>()
        .join("<br/>");
    format!(
        "<div class=\"shiki__error\"><span class=\"error__code\">[{codes}]</span> <span class=\"error__message\">{messages}</span></div>"
    )
}

fn render_query(query: &Query, line: &Line) -> String {
    let caret = display_columns(line, query.offset);
    // `//` takes the first two columns.
    let comment_pad = " ".repeat(caret.saturating_sub(2));

    match &query.kind {
        QueryKind::Hover { text } => format!(
            "<span class=\"query\">//{comment_pad}^ = {}</span>",
            escape_text(text)
        ),
        QueryKind::Completions { names, .. } if names.is_empty() => format!(
            "<span class=\"query\">//{comment_pad}^ - No completions found</span>"
        ),
        QueryKind::Completions { prefix, names } => {
            let prefix = prefix.as_deref().unwrap_or("");
            let mut found: Vec<&str> = names
                .iter()
                .map(String::as_str)
                .filter(|name| name.starts_with(prefix))
                .collect();
            found.sort_unstable();

            let items: String = found
                .iter()
                .map(|name| {
                    format!(
                        "<li><span><span class=\"result-found\">{}</span>{}</span></li>",
                        escape_text(prefix),
                        escape_text(&name[prefix.len()..])
                    )
                })
                .collect();
            format!(
                "{}<span class=\"inline-completions\"><ul class=\"dropdown\">{items}</ul></span>",
                " ".repeat(caret)
            )
        }
    }
}

/// Display width of the first `columns` chars of `line`.
///
/// Columns past the end of the line count as one cell each.
fn display_columns(line: &Line, columns: usize) -> usize {
    let mut chars = line.iter().flat_map(|token| token.content.chars());
    (0..columns)
        .map(|_| chars.next().and_then(|c| c.width()).unwrap_or(1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighter::MonochromeHighlighter;
    use pretty_assertions::assert_eq;

    fn line(parts: &[&str]) -> Line {
        parts.iter().map(|p| Token::new(*p, "#fff")).collect()
    }

    #[test]
    fn test_render_line_advances_file_pos() {
        let options = RenderOptions::new();
        let bundle = AnnotationBundle::new();
        let hl = MonochromeHighlighter::default();
        let renderer = AnnotatedRenderer::new(&options, &bundle, &hl);

        let rendered = renderer.render_line(0, &line(&["let", " x"]), 0);
        assert_eq!(rendered.file_pos, 6);

        let rendered = renderer.render_line(1, &Vec::new(), 6);
        assert_eq!(rendered.html, "\n");
        assert_eq!(rendered.file_pos, 7);
    }

    #[test]
    fn test_leading_blank_line_consumes_nothing() {
        let options = RenderOptions::new();
        let bundle = AnnotationBundle::new();
        let hl = MonochromeHighlighter::default();
        let renderer = AnnotatedRenderer::new(&options, &bundle, &hl);

        let rendered = renderer.render_line(0, &Vec::new(), 0);
        assert_eq!(rendered.html, "");
        assert_eq!(rendered.file_pos, 0);
    }

    #[test]
    fn test_error_on_second_line_uses_absolute_offset() {
        let options = RenderOptions::new();
        let bundle: AnnotationBundle = [ErrorAnnotation {
            line: 1,
            character: 4,
            start: 10,
            length: 1,
            code: "2304".to_string(),
            rendered_message: "Cannot find name 'y'.".to_string(),
        }]
        .into_iter()
        .collect();
        let hl = MonochromeHighlighter::default();
        let renderer = AnnotatedRenderer::new(&options, &bundle, &hl);

        // Line 0 is `let x` (5 chars + newline), so line 1 starts at offset 6.
        let rendered = renderer.render_line(1, &line(&["let", " ", "y"]), 6);
        assert!(rendered.html.contains(r#"<span class="err">y</span>"#));
        assert!(rendered.html.contains("[2304]"));
        assert!(rendered.html.contains("Cannot find name &#39;y&#39;."));
    }

    #[test]
    fn test_line_highlight_variants() {
        let options = RenderOptions::new().with_line_highlights([2]);
        let bundle = AnnotationBundle::new();
        let hl = MonochromeHighlighter::default();
        let html = render_annotated(&[line(&["a"]), line(&["b"])], &options, &bundle, &hl);

        assert!(html.contains(r#"<div class="shiki__dim"><div class="shiki__token" style="color: #fff">a</div></div>"#));
        assert!(html.contains(r#"<div class="shiki__highlight"><div class="shiki__token" style="color: #fff">b</div></div>"#));
        assert!(!html.contains("shiki__line"));
    }

    #[test]
    fn test_hover_query_is_padded_to_caret() {
        let options = RenderOptions::new();
        let bundle: AnnotationBundle = [Query {
            line: 1,
            offset: 4,
            start: 4,
            length: 1,
            kind: QueryKind::Hover {
                text: "const x: 1".to_string(),
            },
        }]
        .into_iter()
        .collect();
        let hl = MonochromeHighlighter::default();
        let html = render_annotated(&[line(&["let x = 1"]), line(&["//  ^?"])], &options, &bundle, &hl);

        assert!(html.contains(r#"<span class="query">//  ^ = const x: 1</span>"#));
    }

    #[test]
    fn test_completions_without_names() {
        let query = Query {
            line: 1,
            offset: 3,
            start: 0,
            length: 0,
            kind: QueryKind::Completions {
                prefix: Some("x".to_string()),
                names: Vec::new(),
            },
        };
        assert_eq!(
            render_query(&query, &line(&["a.x"])),
            r#"<span class="query">// ^ - No completions found</span>"#
        );
    }

    #[test]
    fn test_completions_without_prefix_lists_everything() {
        let query = Query {
            line: 1,
            offset: 2,
            start: 0,
            length: 0,
            kind: QueryKind::Completions {
                prefix: None,
                names: vec!["b".to_string(), "a".to_string()],
            },
        };
        assert_eq!(
            render_query(&query, &line(&["a."])),
            concat!(
                r#"  <span class="inline-completions"><ul class="dropdown">"#,
                r#"<li><span><span class="result-found"></span>a</span></li>"#,
                r#"<li><span><span class="result-found"></span>b</span></li>"#,
                "</ul></span>"
            )
        );
    }

    #[test]
    fn test_quick_info_docs_follow_hover_code() {
        let options = RenderOptions::new();
        let bundle: AnnotationBundle = [QuickInfo {
            line: 0,
            character: 0,
            start: 0,
            length: 1,
            kind: "lsp".to_string(),
            text: "function f(): void".to_string(),
            docs: Some("Runs <f>.".to_string()),
        }]
        .into_iter()
        .collect();
        let hl = MonochromeHighlighter::new("#fff");
        let html = render_annotated(&[line(&["f", "()"])], &options, &bundle, &hl);

        let hover = format!(
            "{}<div class=\"lsp-docs\">Runs &lt;f&gt;.</div>",
            render_plain(&hl.highlight("function f(): void", "text"), &RenderOptions::new())
        );
        assert!(
            html.contains(&format!("data-lsp=\"{}\"", escape_text(&hover))),
            "{html}"
        );
    }

    #[test]
    fn test_quick_info_without_docs_has_no_docs_element() {
        let options = RenderOptions::new();
        let bundle: AnnotationBundle = [QuickInfo {
            line: 0,
            character: 0,
            start: 0,
            length: 1,
            kind: "lsp".to_string(),
            text: "const a: 1".to_string(),
            docs: None,
        }]
        .into_iter()
        .collect();
        let hl = MonochromeHighlighter::default();
        let html = render_annotated(&[line(&["a"])], &options, &bundle, &hl);
        assert!(html.contains("data-lsp="));
        assert!(!html.contains("lsp-docs"));
    }

    #[test]
    fn test_display_columns_counts_wide_chars() {
        assert_eq!(display_columns(&line(&["中文x"]), 3), 5);
        assert_eq!(display_columns(&line(&["ab"]), 4), 4);
    }

    #[test]
    fn test_query_on_line_zero_is_skipped() {
        let options = RenderOptions::new();
        let bundle: AnnotationBundle = [Query {
            line: 0,
            offset: 0,
            start: 0,
            length: 0,
            kind: QueryKind::Hover {
                text: "x".to_string(),
            },
        }]
        .into_iter()
        .collect();
        let hl = MonochromeHighlighter::default();
        let html = render_annotated(&[line(&["x"])], &options, &bundle, &hl);
        assert!(!html.contains("query"));
    }
}
