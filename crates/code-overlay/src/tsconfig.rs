//! `tsconfig.json` rendering with compiler-option descriptions.

use crate::escape::escape_text;
use crate::model::{Line, Token};
use crate::options::RenderOptions;
use crate::plain::trim_trailing_newlines;
use crate::tsconfig_options::TSCONFIG_ONELINERS;

/// Reference page for compiler options; keys are appended as a fragment.
pub const TSCONFIG_REFERENCE_URL: &str = "https://www.typescriptlang.org/tsconfig";

/// One-line description of a compiler option, if the key is known.
pub fn tsconfig_oneliner(key: &str) -> Option<&'static str> {
    TSCONFIG_ONELINERS
        .binary_search_by(|(k, _)| (*k).cmp(key))
        .ok()
        .map(|idx| TSCONFIG_ONELINERS[idx].1)
}

/// Render a highlighted `tsconfig.json` block.
///
/// Quoted keys naming a known compiler option link to the reference page and carry the
/// option's one-liner as hover text.
pub fn render_tsconfig(lines: &[Line], options: &RenderOptions) -> String {
    let mut html = String::from("<pre class=\"shiki tsconfig lsp\">");
    if let Some(lang_id) = &options.lang_id {
        html.push_str(&format!(
            "<div class=\"language-id\">{}</div>",
            escape_text(lang_id)
        ));
    }
    html.push_str("<div class=\"code-container\"><code>");

    for line in lines {
        for token in line {
            html.push_str(&render_token(token));
        }
        html.push('\n');
    }

    trim_trailing_newlines(&mut html);
    html.push_str("</code></div></pre>");
    html
}

fn render_token(token: &Token) -> String {
    let color = escape_text(&token.color);
    let known = quoted_key(&token.content)
        .and_then(|key| tsconfig_oneliner(key).map(|oneliner| (key, oneliner)));

    match known {
        Some((key, oneliner)) => format!(
            "<span style=\"color: {color}\">\"<a aria-hidden=\"true\" tabindex=\"-1\" href=\"{TSCONFIG_REFERENCE_URL}#{key}\"><span class=\"lsp\" data-lsp=\"{}\">{}</span></a>\"</span>",
            escape_text(oneliner),
            escape_text(key)
        ),
        None => format!(
            "<span style=\"color: {color}\">{}</span>",
            escape_text(&token.content)
        ),
    }
}

fn quoted_key(content: &str) -> Option<&str> {
    content
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_oneliner_table_is_sorted() {
        assert!(TSCONFIG_ONELINERS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_oneliner_lookup() {
        assert_eq!(
            tsconfig_oneliner("strict"),
            Some("Enable TypeScript's most in-depth type checking rules")
        );
        assert_eq!(tsconfig_oneliner("notAnOption"), None);
    }

    #[test]
    fn test_known_key_is_linked() {
        let lines = vec![vec![
            Token::new("\"target\"", "#9CDCFE"),
            Token::new(": ", "#D4D4D4"),
            Token::new("\"es2019\"", "#CE9178"),
        ]];
        let html = render_tsconfig(&lines, &RenderOptions::new());
        assert_eq!(
            html,
            concat!(
                r#"<pre class="shiki tsconfig lsp"><div class="code-container"><code>"#,
                r#"<span style="color: #9CDCFE">"<a aria-hidden="true" tabindex="-1" href="https://www.typescriptlang.org/tsconfig#target">"#,
                r#"<span class="lsp" data-lsp="Set the supported JavaScript language runtime to transpile to">target</span></a>"</span>"#,
                r#"<span style="color: #D4D4D4">: </span>"#,
                r#"<span style="color: #CE9178">&quot;es2019&quot;</span>"#,
                "</code></div></pre>"
            )
        );
    }

    #[test]
    fn test_lone_quote_is_not_a_key() {
        assert_eq!(quoted_key("\""), None);
        assert_eq!(quoted_key("\"\""), None);
        assert_eq!(quoted_key("\"lib\""), Some("lib"));
    }
}
