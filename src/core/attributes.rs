//! Attribute Parsing
//!
//! Splits the raw content of a start tag (everything after the element name)
//! into attributes. Recovering: stray bytes are skipped, a name without `=`
//! gets an empty value, unquoted values run to the next space and an
//! unterminated quote runs to the end of the tag.

use super::entities::decode_text;
use super::scanner::{is_name_char, is_name_start_char, is_whitespace};
use memchr::memchr;
use std::borrow::Cow;

/// One attribute of a start tag
#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    /// Qualified name as written, e.g. `rdf:resource`
    pub name: &'a [u8],
    /// Value with entities decoded
    pub value: Cow<'a, [u8]>,
}

impl<'a> Attribute<'a> {
    #[inline]
    pub fn prefix(&self) -> Option<&'a [u8]> {
        split_name(self.name).0
    }

    #[inline]
    pub fn local_name(&self) -> &'a [u8] {
        split_name(self.name).1
    }

    pub fn name_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.name).ok()
    }

    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }

    /// `xmlns` or `xmlns:<prefix>`
    pub fn is_namespace_declaration(&self) -> bool {
        match self.prefix() {
            Some(prefix) => prefix == b"xmlns",
            None => self.name == b"xmlns",
        }
    }
}

/// Split a qualified name at its first colon
#[inline]
pub fn split_name(name: &[u8]) -> (Option<&[u8]>, &[u8]) {
    match memchr(b':', name) {
        Some(colon) => (Some(&name[..colon]), &name[colon + 1..]),
        None => (None, name),
    }
}

/// Iterator over the attributes of raw tag content
pub struct Attributes<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Attributes<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Attributes { input, pos: 0 }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.pos;
        while self.peek().is_some_and(&keep) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        self.take_while(is_whitespace);
    }

    fn value(&mut self) -> &'a [u8] {
        match self.peek() {
            None => b"",
            Some(quote @ (b'"' | b'\'')) => {
                let start = self.pos + 1;
                let end = memchr(quote, &self.input[start..]).map_or(self.input.len(), |i| start + i);
                self.pos = (end + 1).min(self.input.len());
                &self.input[start..end]
            }
            Some(_) => self.take_while(|b| !is_whitespace(b) && b != b'/' && b != b'>'),
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = Attribute<'a>;

    fn next(&mut self) -> Option<Attribute<'a>> {
        loop {
            self.skip_whitespace();
            match self.peek()? {
                b'/' | b'>' => return None,
                b if !is_name_start_char(b) => self.pos += 1,
                _ => break,
            }
        }

        let name = self.take_while(is_name_char);
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Some(Attribute {
                name,
                value: Cow::Borrowed(b""),
            });
        }
        self.pos += 1;
        self.skip_whitespace();

        Some(Attribute {
            name,
            value: decode_text(self.value()),
        })
    }
}

/// Parse all attributes of raw tag content
pub fn parse_attributes(input: &[u8]) -> Vec<Attribute<'_>> {
    Attributes::new(input).collect()
}
