//! Annotation-free block rendering.

use crate::escape::escape_text;
use crate::model::Line;
use crate::options::RenderOptions;

/// Render highlighted lines as a plain code block.
///
/// This is also the renderer used for hover text nested inside an annotated block.
pub fn render_plain(lines: &[Line], options: &RenderOptions) -> String {
    let mut html = String::from("<pre class=\"shiki\">");
    if let Some(lang_id) = &options.lang_id {
        html.push_str(&format!(
            "<div class=\"language-id\">{}</div>",
            escape_text(lang_id)
        ));
    }
    html.push_str("<div class=\"code-container\"><code>");

    for line in lines {
        for token in line {
            html.push_str(&format!(
                "<span style=\"color: {}\">{}</span>",
                escape_text(&token.color),
                escape_text(&token.content)
            ));
        }
        html.push('\n');
    }

    trim_trailing_newlines(&mut html);
    html.push_str("</code></div></pre>");
    html
}

pub(crate) fn trim_trailing_newlines(html: &mut String) {
    let trimmed = html.trim_end_matches('\n').len();
    html.truncate(trimmed);
}
