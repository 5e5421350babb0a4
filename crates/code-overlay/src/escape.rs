//! HTML escaping and reserved-marker substitution.
//!
//! Token text is assembled into a larger markup string before the final output is produced.
//! Source characters that look like markup (`<`, `>`, `'`) are swapped for reserved marker
//! characters while the block is being assembled, then turned into entities in one final pass
//! ([`replace_triple_arrow_encoded`]). Markers already present in the source are written as
//! numeric character references up front, so the final pass never touches them.

/// Marker standing in for `<`.
pub const OPEN_MARKER: char = '⇍';
/// Marker standing in for `>`.
pub const CLOSE_MARKER: char = '⇏';
/// Marker standing in for `'`.
pub const QUOTE_MARKER: char = '⇯';

/// Escape the five XML-reserved characters.
///
/// An `&` that already starts a character reference (`&name;`, `&#NN;`, `&#xHH;`) is kept, so
/// escaping escaped text is a no-op.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        match ch {
            '&' if starts_char_reference(&text[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Whether `text` (starting at `&`) begins with a well-formed character reference.
fn starts_char_reference(text: &str) -> bool {
    let Some(body) = text.strip_prefix('&') else {
        return false;
    };
    let Some(end) = body.find(';') else {
        return false;
    };
    let name = &body[..end];

    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(dec) = name.strip_prefix('#') {
        !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit())
    } else {
        name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && name.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

/// [`escape_html`], with marker characters written as numeric references.
///
/// Use this for every text node or attribute value that is not token content.
pub fn escape_text(text: &str) -> String {
    protect_markers(&escape_html(text))
}

/// Swap `<`, `>` and `'` for their markers.
pub fn sub_triple_arrow(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push(OPEN_MARKER),
            '>' => out.push(CLOSE_MARKER),
            '\'' => out.push(QUOTE_MARKER),
            other => push_protected(&mut out, other),
        }
    }
    out
}

/// Turn markers back into raw `<`, `>` and `'`.
pub fn replace_triple_arrow(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            OPEN_MARKER => '<',
            CLOSE_MARKER => '>',
            QUOTE_MARKER => '\'',
            other => other,
        })
        .collect()
}

/// Turn markers into `&lt;`, `&gt;` and `&apos;`.
pub fn replace_triple_arrow_encoded(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            OPEN_MARKER => out.push_str("&lt;"),
            CLOSE_MARKER => out.push_str("&gt;"),
            QUOTE_MARKER => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Token content as it is embedded in the block before the final pass.
///
/// `&` is escaped immediately; everything markup-like goes through [`sub_triple_arrow`].
pub(crate) fn token_text(text: &str) -> String {
    sub_triple_arrow(&text.replace('&', "&amp;"))
}

fn protect_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_protected(&mut out, ch);
    }
    out
}

fn push_protected(out: &mut String, ch: char) {
    if matches!(ch, OPEN_MARKER | CLOSE_MARKER | QUOTE_MARKER) {
        out.push_str(&format!("&#x{:X};", ch as u32));
    } else {
        out.push(ch);
    }
}
