//! Typed errors for index parsing, traversal, and transport decoding.

use thiserror::Error;

/// Errors detected while validating an index header.
///
/// All of these are fatal to the parse: no partial [`SearchIndex`] is ever
/// returned.
///
/// [`SearchIndex`]: crate::index::reader::SearchIndex
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The buffer is too short to hold the header and root pointer.
    #[error("index data too short ({len} bytes)")]
    TooShort { len: usize },

    /// The three-byte magic signature does not match.
    #[error("invalid index data signature")]
    BadSignature,

    /// The version byte is not a version this reader understands.
    #[error("unsupported index data version {0}")]
    UnsupportedVersion(u8),
}

/// Errors raised when decoding runs outside the trie or result-map regions.
///
/// These indicate a malformed or adversarial index. They are not retried;
/// the session that produced one is unusable and the condition should be
/// reported to whatever supplied the blob.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CorruptIndex {
    /// A trie node (or its result/child tables) runs past the trie region.
    #[error("trie node at offset {offset:#x} runs past the trie region")]
    NodeOutOfBounds { offset: u32 },

    /// A result index has no entry (plus end sentinel) in the result map.
    #[error("result index {index} outside the result map")]
    ResultOutOfBounds { index: u16 },

    /// A record's map entries describe an inverted or out-of-range range.
    #[error("result record {index} has invalid bounds")]
    BadRecordBounds { index: u16 },

    /// A record is shorter than the fields its flags byte promises.
    #[error("result record {index} truncated")]
    TruncatedRecord { index: u16 },

    /// An alias/prefix chain exceeds the resolution depth cap, which only
    /// a cyclic or degenerate index can produce.
    #[error("alias or prefix chain too deep resolving record {index}")]
    ChainTooDeep { index: u16 },

    /// A surfaced record carries a kind code outside the defined range.
    #[error("result record {index} has unknown kind code {code}")]
    BadKind { index: u16, code: u8 },

    /// A resolved name or URL is not valid UTF-8.
    #[error("result record {index} is not valid UTF-8")]
    BadEncoding { index: u16 },
}

/// Errors from the base85 transport decoder.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Encoded input must come in whole 5-character groups.
    #[error("base85 data length {0} is not a multiple of 5")]
    UnpaddedLength(usize),
}
