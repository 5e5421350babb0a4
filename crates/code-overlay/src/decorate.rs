//! Per-token decoration ranges and their nested markup.

use crate::escape::{escape_text, token_text};
use crate::options::MisalignedRangePolicy;

/// A transient, token-relative `[begin, end)` span with its display class.
///
/// `begin`/`end` are signed: a range computed from an annotation that was cut at a block
/// boundary can start before the token it was matched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationRange {
    /// Start offset relative to the token start (chars).
    pub begin: isize,
    /// End offset relative to the token start (chars, exclusive).
    pub end: isize,
    /// CSS class of the wrapping element.
    pub class: String,
    /// Rendered hover markup attached to the element, if any.
    pub hover: Option<String>,
}

impl DecorationRange {
    /// Create a range without hover markup.
    pub fn new(begin: isize, end: isize, class: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            class: class.into(),
            hover: None,
        }
    }

    /// Attach rendered hover markup.
    pub fn with_hover(mut self, hover: impl Into<String>) -> Self {
        self.hover = Some(hover.into());
        self
    }

    fn resolve(&self, len: usize, policy: MisalignedRangePolicy) -> Option<(usize, usize)> {
        let limit = len as isize;
        if 0 <= self.begin && self.begin <= self.end && self.end <= limit {
            return Some((self.begin as usize, self.end as usize));
        }

        log::warn!(
            "decoration `{}` [{}, {}) does not fit its token (len {}), policy {:?}",
            self.class,
            self.begin,
            self.end,
            len,
            policy
        );
        match policy {
            MisalignedRangePolicy::Drop => None,
            MisalignedRangePolicy::Clip => {
                let begin = self.begin.clamp(0, limit) as usize;
                let end = self.end.clamp(0, limit) as usize;
                (begin < end).then_some((begin, end))
            }
        }
    }

    fn open_tag(&self) -> String {
        match &self.hover {
            Some(hover) => format!(
                "<span class=\"{}\" data-lsp=\"{}\">",
                escape_text(&self.class),
                escape_text(hover)
            ),
            None => format!("<span class=\"{}\">", escape_text(&self.class)),
        }
    }
}

struct Span<'a> {
    begin: usize,
    end: usize,
    range: &'a DecorationRange,
}

/// Split `text` at every range boundary and wrap the pieces in nested elements.
///
/// `ranges` are expected in ascending start order. The output is always well-formed: when a
/// range has to close while a range opened after it is still open, the inner one is closed
/// and reopened around the boundary. Ranges sharing a start open longest-first, so a smaller
/// range contained in a larger one nests inside it.
pub fn wrap_decorations(
    text: &str,
    ranges: &[DecorationRange],
    policy: MisalignedRangePolicy,
) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let spans: Vec<Span<'_>> = ranges
        .iter()
        .filter_map(|range| {
            let (begin, end) = range.resolve(len, policy)?;
            Some(Span { begin, end, range })
        })
        .collect();

    let mut bounds: Vec<usize> = spans
        .iter()
        .flat_map(|s| [s.begin, s.end])
        .chain([0, len])
        .collect();
    bounds.sort_unstable();
    bounds.dedup();

    let mut out = String::with_capacity(text.len() * 2);
    let mut stack: Vec<usize> = Vec::new();

    for (idx, &pos) in bounds.iter().enumerate() {
        if let Some(depth) = stack.iter().position(|&s| spans[s].end == pos) {
            let closed: Vec<usize> = stack.drain(depth..).collect();
            for _ in &closed {
                out.push_str("</span>");
            }
            for s in closed {
                if spans[s].end != pos {
                    out.push_str(&spans[s].range.open_tag());
                    stack.push(s);
                }
            }
        }

        for span in spans.iter().filter(|s| s.begin == pos && s.end == pos) {
            out.push_str(&span.range.open_tag());
            out.push_str("</span>");
        }

        let mut opening: Vec<usize> = (0..spans.len())
            .filter(|&s| spans[s].begin == pos && spans[s].end > pos)
            .collect();
        opening.sort_by(|&a, &b| spans[b].end.cmp(&spans[a].end));
        for s in opening {
            out.push_str(&spans[s].range.open_tag());
            stack.push(s);
        }

        if let Some(&next) = bounds.get(idx + 1) {
            let segment: String = chars[pos..next].iter().collect();
            out.push_str(&token_text(&segment));
        }
    }

    debug_assert!(stack.is_empty());
    out
}
