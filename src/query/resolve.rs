//! Recursive reconstruction of a displayable match from a result-map index.
//!
//! A record may reference an alias target (kind code 0) and/or inherit the
//! resolved name/URL of another record as its prefix. Both references are
//! plain indices into the result map, so resolution is a recursion over
//! `MapView::record` with no shared object graph. The index builder never
//! emits cycles, but a corrupt blob could, so the recursion carries a depth
//! counter and gives up with `CorruptIndex::ChainTooDeep` past
//! [`MAX_CHAIN_DEPTH`] links.

use crate::error::CorruptIndex;
use crate::index::format::{RecordFlags, SymbolKind};
use crate::index::map::MapView;
use memchr::memchr;
use serde::Serialize;

/// Longest alias/prefix chain accepted before the index is declared corrupt
pub const MAX_CHAIN_DEPTH: usize = 32;

/// A fully resolved search match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Full symbol name (prefix chain concatenated with this record's own
    /// name bytes)
    pub name: String,
    /// Target URL, assembled the same way
    pub url: String,
    pub kind: SymbolKind,
    pub deprecated: bool,
    pub deleted: bool,
    /// For alias matches: the name of the record the alias points at.
    /// `url`, `kind` and the display flags already come from that target.
    pub alias_of: Option<String>,
    /// How many name bytes extend past the typed prefix, for display slicing
    pub suffix_length: usize,
}

/// Distinguishes the entry call from recursive prefix resolution.
///
/// Alias targets are chased only at top level; while resolving a prefix the
/// alias reference is parsed and ignored. Nested calls also cap how many
/// URL bytes the prefix contributes.
#[derive(Debug, Clone, Copy)]
enum Context {
    TopLevel,
    NestedPrefix { url_cap: usize },
}

impl Context {
    fn url_cap(&self) -> usize {
        match self {
            Context::TopLevel => usize::MAX,
            Context::NestedPrefix { url_cap } => *url_cap,
        }
    }
}

/// Intermediate resolution state. Name and URL stay as raw bytes through
/// the recursion because prefix caps count bytes and may split a UTF-8
/// sequence mid-chain; only the completed top-level result is decoded.
struct RawMatch {
    name: Vec<u8>,
    url: Vec<u8>,
    flags_byte: u8,
    alias_name: Option<Vec<u8>>,
    extra_suffix: usize,
}

/// Resolve `index` into a [`MatchRecord`]. `suffix_depth` is the number of
/// trie edges the gatherer walked past the typed prefix to reach it.
pub(crate) fn resolve(
    map: &MapView<'_>,
    index: u16,
    suffix_depth: usize,
) -> Result<MatchRecord, CorruptIndex> {
    let raw = resolve_raw(map, index, Context::TopLevel, 0)?;

    let flags = RecordFlags(raw.flags_byte);
    let code = flags.kind_code();
    let kind = SymbolKind::from_code(code).ok_or(CorruptIndex::BadKind { index, code })?;
    let bad_encoding = |_| CorruptIndex::BadEncoding { index };

    Ok(MatchRecord {
        name: String::from_utf8(raw.name).map_err(bad_encoding)?,
        url: String::from_utf8(raw.url).map_err(bad_encoding)?,
        kind,
        deprecated: flags.is_deprecated(),
        deleted: flags.is_deleted(),
        alias_of: match raw.alias_name {
            Some(bytes) => Some(String::from_utf8(bytes).map_err(bad_encoding)?),
            None => None,
        },
        suffix_length: suffix_depth + raw.extra_suffix,
    })
}

fn resolve_raw(
    map: &MapView<'_>,
    index: u16,
    ctx: Context,
    depth: usize,
) -> Result<RawMatch, CorruptIndex> {
    if depth > MAX_CHAIN_DEPTH {
        return Err(CorruptIndex::ChainTooDeep { index });
    }

    let record = map.record(index)?;
    let bytes = record.bytes;
    let truncated = CorruptIndex::TruncatedRecord { index };
    let mut cursor = 0usize;

    // Field order is fixed: alias index, prefix reference, suffix length,
    // NUL-terminated name, URL bytes to the record end.

    let mut alias_target = None;
    if record.flags.is_alias() {
        let field = bytes.get(..2).ok_or(truncated)?;
        alias_target = Some(u16::from_le_bytes(field.try_into().unwrap()));
        cursor += 2;
    }

    let mut name = Vec::new();
    let mut url = Vec::new();
    if record.flags.has_prefix() {
        let field = bytes.get(cursor..cursor + 3).ok_or(truncated)?;
        let prefix_index = u16::from_le_bytes(field[..2].try_into().unwrap());
        let url_cap = (field[2] as usize).min(ctx.url_cap());
        cursor += 3;

        let prefix = resolve_raw(map, prefix_index, Context::NestedPrefix { url_cap }, depth + 1)?;
        name = prefix.name;
        url = prefix.url;
    }

    let mut extra_suffix = 0;
    if record.flags.has_suffix_len() {
        extra_suffix = *bytes.get(cursor).ok_or(truncated)? as usize;
        cursor += 1;
    }

    let rest = &bytes[cursor.min(bytes.len())..];
    match memchr(0, rest) {
        Some(end) => {
            name.extend_from_slice(&rest[..end]);
            cursor += end + 1;
        }
        None => {
            // No terminator: the name runs to the record end, leaving no URL
            name.extend_from_slice(rest);
            cursor = bytes.len();
        }
    }

    // Chase the alias only from a top-level call. The target supplies the
    // URL and the whole flags byte (kind and display flags); this record
    // keeps its own name and explicit suffix length.
    if let (Some(target), Context::TopLevel) = (alias_target, ctx) {
        let alias = resolve_raw(map, target, Context::TopLevel, depth + 1)?;
        return Ok(RawMatch {
            name,
            url: alias.url,
            flags_byte: alias.flags_byte,
            alias_name: Some(alias.name),
            extra_suffix,
        });
    }

    let rest = &bytes[cursor.min(bytes.len())..];
    let take = rest.len().min(ctx.url_cap().saturating_sub(url.len()));
    url.extend_from_slice(&rest[..take]);

    Ok(RawMatch {
        name,
        url,
        flags_byte: record.flags.0,
        alias_name: None,
        extra_suffix,
    })
}
