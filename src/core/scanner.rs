//! Delimiter Scanning
//!
//! Byte-level search over the input for the slice reader. `<` and the
//! multi-byte terminators go through memchr/memmem (SIMD where available);
//! quote-aware tag ends and DOCTYPE subsets are walked byte by byte.

use memchr::{memchr, memmem};

/// Cursor over the input with delimiter search
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position (clamped to the input length)
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Total input length
    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Position of the next `<`
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find the next occurrence of a multi-byte terminator (`-->`, `]]>`, `?>`)
    /// at or after `from`
    #[inline]
    pub fn find_seq(&self, from: usize, needle: &[u8]) -> Option<usize> {
        let from = from.min(self.input.len());
        memmem::find(&self.input[from..], needle).map(|i| from + i)
    }

    /// Position of the `>` closing the current tag; `>` inside a quoted
    /// attribute value does not count
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut quote: Option<u8> = None;
        for (offset, &b) in self.input[self.pos..].iter().enumerate() {
            match (quote, b) {
                (None, b'"' | b'\'') => quote = Some(b),
                (Some(open), _) if open == b => quote = None,
                (None, b'>') => return Some(self.pos + offset),
                _ => {}
            }
        }
        None
    }

    /// Find the '>' closing a DOCTYPE, skipping an internal subset in brackets
    pub fn find_doctype_end(&self) -> Option<usize> {
        let mut depth = 0usize;
        for (offset, &b) in self.input[self.pos..].iter().enumerate() {
            match b {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => return Some(self.pos + offset),
                _ => {}
            }
        }
        None
    }
}

/// Read an XML name from the start of `input`
/// (starts with letter/underscore/colon, continues with name chars)
pub fn read_name(input: &[u8]) -> Option<&[u8]> {
    let first = *input.first()?;
    if !is_name_start_char(first) {
        return None;
    }
    let end = input
        .iter()
        .position(|&b| !is_name_char(b))
        .unwrap_or(input.len());
    Some(&input[..end])
}

/// Check if byte is XML whitespace
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Check if byte is valid XML name start character
/// Allows ASCII letters, underscore, colon, and non-ASCII (UTF-8 Unicode)
#[inline]
pub fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

/// Check if byte is valid XML name character
/// Allows ASCII alphanumeric, punctuation, and non-ASCII (UTF-8 Unicode)
#[inline]
pub fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}
