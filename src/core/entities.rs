//! XML Entity Decoding
//!
//! Handles decoding of the predefined XML entities (`&lt;` `&gt;` `&amp;`
//! `&quot;` `&apos;`) and numeric character references (`&#123;` `&#x7B;`).
//!
//! Uses Cow for zero-copy when no entities are present, which is the common
//! case for CIM identifiers, names and numeric values.

use memchr::memchr;
use std::borrow::Cow;

/// Decode text content, handling entity references
///
/// Returns Borrowed if no entities present (zero-copy),
/// returns Owned if entities were decoded.
#[inline]
pub fn decode_text(input: &[u8]) -> Cow<'_, [u8]> {
    if memchr(b'&', input).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(decode_entities(input))
}

/// Decode all entity references in the input
///
/// Unknown entities and bare ampersands are kept verbatim.
pub fn decode_entities(input: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let Some(amp_pos) = memchr(b'&', &input[pos..]) else {
            result.extend_from_slice(&input[pos..]);
            break;
        };
        result.extend_from_slice(&input[pos..pos + amp_pos]);
        pos += amp_pos;

        let decoded = memchr(b';', &input[pos..]).and_then(|semi_offset| {
            let entity = &input[pos + 1..pos + semi_offset];
            decode_entity(entity).map(|c| (c, semi_offset))
        });

        match decoded {
            Some((c, semi_offset)) => {
                let mut buf = [0u8; 4];
                result.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                pos += semi_offset + 1;
            }
            None => {
                result.push(b'&');
                pos += 1;
            }
        }
    }

    result
}

/// Decode a single entity (without & and ;)
fn decode_entity(entity: &[u8]) -> Option<char> {
    match entity {
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"amp" => Some('&'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        [b'#', rest @ ..] => decode_numeric_entity(rest),
        _ => None,
    }
}

/// Decode a numeric character reference (the part after `&#`)
fn decode_numeric_entity(entity: &[u8]) -> Option<char> {
    let codepoint = match entity {
        [b'x' | b'X', hex @ ..] => u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?,
        dec => std::str::from_utf8(dec).ok()?.parse::<u32>().ok()?,
    };
    char::from_u32(codepoint)
}
