//! Transport codec for inlining index blobs in ASCII-only carriers.
//!
//! Five symbols from an 85-character alphabet encode one big-endian u32,
//! i.e. four raw bytes. The alphabet runs digits, uppercase, lowercase,
//! then a fixed punctuation set that avoids quote and comma characters so
//! payloads can sit inside string literals untouched.

use crate::error::TransportError;

const GROUP_ENCODED: usize = 5;
const GROUP_RAW: usize = 4;

/// Symbol value, or 0 for characters outside the alphabet. Padding and
/// stray whitespace therefore decode as zero bytes rather than failing,
/// matching the tolerant consumer this format was designed for.
fn symbol_value(c: u8) -> u32 {
    match c {
        b'0'..=b'9' => (c - b'0') as u32,
        b'A'..=b'Z' => (c - b'A') as u32 + 10,
        b'a'..=b'z' => (c - b'a') as u32 + 36,
        b'!' => 62,
        // '"' skipped
        b'#'..=b'&' => (c - b'#') as u32 + 63,
        // '\'' skipped
        b'('..=b'+' => (c - b'(') as u32 + 67,
        // ',' skipped
        b'-' => 71,
        b';'..=b'@' => (c - b';') as u32 + 72,
        b'^'..=b'`' => (c - b'^') as u32 + 78,
        b'{'..=b'~' => (c - b'{') as u32 + 81,
        _ => 0,
    }
}

/// Symbol for a value in 0..85
fn symbol_char(value: u32) -> u8 {
    debug_assert!(value < 85);
    match value {
        0..=9 => b'0' + value as u8,
        10..=35 => b'A' + (value - 10) as u8,
        36..=61 => b'a' + (value - 36) as u8,
        62 => b'!',
        63..=66 => b'#' + (value - 63) as u8,
        67..=70 => b'(' + (value - 67) as u8,
        71 => b'-',
        72..=77 => b';' + (value - 72) as u8,
        78..=80 => b'^' + (value - 78) as u8,
        _ => b'{' + (value - 81) as u8,
    }
}

/// Decode a base85 payload into raw bytes.
///
/// The encoder always emits whole groups, so anything else is rejected
/// up front; no other validation is performed.
pub fn decode(text: &str) -> Result<Vec<u8>, TransportError> {
    let input = text.as_bytes();
    if input.len() % GROUP_ENCODED != 0 {
        return Err(TransportError::UnpaddedLength(input.len()));
    }

    let mut data = Vec::with_capacity(input.len() / GROUP_ENCODED * GROUP_RAW);
    for group in input.chunks_exact(GROUP_ENCODED) {
        let word = group
            .iter()
            .fold(0u32, |acc, &c| acc.wrapping_mul(85) + symbol_value(c));
        data.extend_from_slice(&word.to_be_bytes());
    }
    Ok(data)
}

/// Encode raw bytes as base85, zero-padding the input to a whole number
/// of four-byte groups.
pub fn encode(data: &[u8]) -> String {
    let mut out = Vec::with_capacity(data.len().div_ceil(GROUP_RAW) * GROUP_ENCODED);
    for group in data.chunks(GROUP_RAW) {
        let mut raw = [0u8; GROUP_RAW];
        raw[..group.len()].copy_from_slice(group);
        let mut word = u32::from_be_bytes(raw);

        let mut symbols = [0u8; GROUP_ENCODED];
        for slot in symbols.iter_mut().rev() {
            *slot = symbol_char(word % 85);
            word /= 85;
        }
        out.extend_from_slice(&symbols);
    }
    // The alphabet is pure ASCII
    String::from_utf8(out).unwrap()
}
