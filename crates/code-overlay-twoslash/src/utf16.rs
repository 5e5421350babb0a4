//! UTF-16 → `char` offset conversion.
//!
//! Analysis payloads count offsets in UTF-16 code units; the renderer counts Unicode scalar
//! values. These helpers convert between the two.

/// Precomputed UTF-16 positions of every character of a text, for repeated lookups.
#[derive(Debug, Clone)]
pub struct Utf16Index {
    /// UTF-16 offset at which each char starts.
    starts: Vec<usize>,
    utf16_len: usize,
}

impl Utf16Index {
    /// Index `text`.
    pub fn new(text: &str) -> Self {
        let mut starts = Vec::with_capacity(text.len());
        let mut utf16_len = 0;
        for ch in text.chars() {
            starts.push(utf16_len);
            utf16_len += ch.len_utf16();
        }
        Self { starts, utf16_len }
    }

    /// Number of chars in the indexed text.
    pub fn char_len(&self) -> usize {
        self.starts.len()
    }

    /// Number of UTF-16 code units in the indexed text.
    pub fn utf16_len(&self) -> usize {
        self.utf16_len
    }

    /// Convert a UTF-16 offset into a char offset.
    ///
    /// Offsets landing inside a surrogate pair round up to the following character. Offsets
    /// past the end clamp to the char count.
    pub fn char_offset(&self, utf16_offset: usize) -> usize {
        self.starts.partition_point(|&start| start < utf16_offset)
    }

    /// Convert a UTF-16 `(start, length)` span into a char `(start, length)` span.
    pub fn char_span(&self, utf16_start: usize, utf16_length: usize) -> (usize, usize) {
        let start = self.char_offset(utf16_start);
        let end = self.char_offset(utf16_start.saturating_add(utf16_length));
        (start, end - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Char offset of the first char starting at or after `utf16_offset`, by direct scan.
    fn scan(text: &str, utf16_offset: usize) -> usize {
        let mut units = 0;
        text.chars()
            .take_while(|ch| {
                let before = units;
                units += ch.len_utf16();
                before < utf16_offset
            })
            .count()
    }

    #[test]
    fn test_ascii_is_identity() {
        assert_eq!(Utf16Index::new("hello").char_offset(3), 3);
    }

    #[test]
    fn test_astral_chars_take_two_units() {
        let index = Utf16Index::new("a😀b");
        assert_eq!(index.utf16_len(), 4);
        assert_eq!(index.char_len(), 3);
        assert_eq!(index.char_offset(2), 2);
        assert_eq!(index.char_offset(3), 2);
        assert_eq!(index.char_offset(4), 3);
        assert_eq!(index.char_span(1, 2), (1, 1));
    }

    #[test]
    fn test_index_agrees_with_scan() {
        let text = "x = \"é😀ü\"\n// ^?";
        let index = Utf16Index::new(text);
        for offset in 0..=index.utf16_len() + 2 {
            assert_eq!(index.char_offset(offset), scan(text, offset), "offset {offset}");
        }
    }

    #[test]
    fn test_offsets_past_end_clamp() {
        let index = Utf16Index::new("ab");
        assert_eq!(index.char_offset(10), 2);
        assert_eq!(index.char_span(1, 10), (1, 1));
    }
}
