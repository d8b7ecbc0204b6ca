//! Zero-Copy Slice Parser
//!
//! Parses XML from a byte slice with zero-copy semantics.
//! Input references are maintained directly in the output.
//!
//! Lenient by default: unterminated markup runs to end of input and stray
//! `<` is treated as text, much like a recovering parser. Strict mode stops at
//! the first problem and reports it through [`SliceReader::error`].

use super::events::{EndElement, StartElement, XmlEvent};
use crate::core::attributes::parse_attributes;
use crate::core::entities::decode_text;
use crate::core::scanner::{is_name_start_char, is_whitespace, read_name, Scanner};
use std::borrow::Cow;

/// A well-formedness problem found by the reader or the document builder
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at byte {position}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}

/// Zero-copy XML reader from a byte slice
pub struct SliceReader<'a> {
    scanner: Scanner<'a>,
    strict: bool,
    error: Option<ParseError>,
}

impl<'a> SliceReader<'a> {
    /// Create a new slice reader (lenient mode)
    pub fn new(input: &'a [u8]) -> Self {
        SliceReader {
            scanner: Scanner::new(input),
            strict: false,
            error: None,
        }
    }

    /// Create a new slice reader in strict mode
    pub fn new_strict(input: &'a [u8]) -> Self {
        SliceReader {
            strict: true,
            ..Self::new(input)
        }
    }

    /// Get parse error (strict mode only)
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next XML event
    pub fn next_event(&mut self) -> Option<XmlEvent<'a>> {
        if self.error.is_some() || self.scanner.is_eof() {
            return None;
        }

        let start = self.scanner.position();

        if self.scanner.peek_at(0) != Some(b'<') {
            let end = self.scanner.find_tag_start().unwrap_or(self.scanner.len());
            self.scanner.set_position(end);
            return Some(XmlEvent::Text(decode_text(self.scanner.slice(start, end))));
        }

        if self.scanner.starts_with(b"<!--") {
            let found = self.scanner.find_seq(start + 4, b"-->");
            let end = self.markup_end("comment", start, found, 3)?;
            return Some(XmlEvent::Comment(self.scanner.slice(start + 4, end)));
        }

        if self.scanner.starts_with(b"<![CDATA[") {
            let found = self.scanner.find_seq(start + 9, b"]]>");
            let end = self.markup_end("CDATA section", start, found, 3)?;
            return Some(XmlEvent::CData(self.scanner.slice(start + 9, end)));
        }

        if self.scanner.starts_with(b"<!") {
            let found = self.scanner.find_doctype_end();
            let end = self.markup_end("DOCTYPE", start, found, 1)?;
            return Some(XmlEvent::DocType(self.scanner.slice(start, end)));
        }

        if self.scanner.starts_with(b"<?") {
            let found = self.scanner.find_seq(start + 2, b"?>");
            let end = self.markup_end("processing instruction", start, found, 2)?;
            let body = self.scanner.slice(start + 2, end);
            let target = read_name(body).unwrap_or(b"");
            let data = trim(&body[target.len()..]);
            return Some(XmlEvent::ProcessingInstruction {
                target,
                data: (!data.is_empty()).then_some(data),
            });
        }

        if self.scanner.starts_with(b"</") {
            let found = self.scanner.find_tag_end_quoted();
            let end = self.markup_end("end tag", start, found, 1)?;
            let name = read_name(trim(self.scanner.slice(start + 2, end))).unwrap_or(b"");
            return Some(XmlEvent::EndElement(EndElement::new(name)));
        }

        match self.scanner.peek_at(1) {
            Some(b) if is_name_start_char(b) => self.start_tag(start),
            _ => {
                if self.strict {
                    self.fail("Invalid character after '<'", start);
                    return None;
                }
                // Stray '<' in text: emit it and carry on
                let end = start + 1;
                self.scanner.set_position(end);
                Some(XmlEvent::Text(Cow::Borrowed(self.scanner.slice(start, end))))
            }
        }
    }

    /// Parse `<name attrs...>` or `<name attrs.../>` starting at `start`
    fn start_tag(&mut self, start: usize) -> Option<XmlEvent<'a>> {
        let found = self.scanner.find_tag_end_quoted();
        let end = self.markup_end("start tag", start, found, 1)?;
        let content = self.scanner.slice(start + 1, end);

        let is_empty = content.last() == Some(&b'/');
        let content = if is_empty { &content[..content.len() - 1] } else { content };

        let name = read_name(content).unwrap_or(b"");
        let attributes = parse_attributes(&content[name.len()..]);
        let elem = StartElement::new(name, attributes);

        Some(if is_empty {
            XmlEvent::EmptyElement(elem)
        } else {
            XmlEvent::StartElement(elem)
        })
    }

    /// Advance past a construct's terminator and return where its content ends
    ///
    /// Unterminated constructs fail in strict mode and run to end of input in
    /// lenient mode.
    fn markup_end(
        &mut self,
        what: &str,
        start: usize,
        found: Option<usize>,
        terminator_len: usize,
    ) -> Option<usize> {
        match found {
            Some(end) => {
                self.scanner.set_position(end + terminator_len);
                Some(end)
            }
            None if self.strict => {
                self.fail(format!("Unterminated {}", what), start);
                None
            }
            None => {
                let end = self.scanner.len();
                self.scanner.set_position(end);
                Some(end)
            }
        }
    }

    fn fail(&mut self, message: impl Into<String>, position: usize) {
        self.error = Some(ParseError::new(message, position));
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = XmlEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| !is_whitespace(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|&b| !is_whitespace(b)).map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Parse XML from a byte slice and return all events
pub fn parse_events(input: &[u8]) -> Vec<XmlEvent<'_>> {
    SliceReader::new(input).collect()
}
