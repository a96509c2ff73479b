use serde::{Deserialize, Serialize};

/// Three-byte magic signature at the start of every index blob
pub const MAGIC: [u8; 3] = *b"MCS";

/// The only format version this reader accepts
pub const FORMAT_VERSION: u8 = 0;

/// Fixed header size: magic (3) + version (1) + symbol count (2) + map offset (4)
pub const HEADER_LEN: usize = 10;

/// Smallest well-formed blob: header + root pointer + empty map sentinel
/// footprint. Anything shorter cannot be sliced into regions at all.
pub const MIN_INDEX_LEN: usize = 20;

/// Low 24 bits of a result-map entry: record offset within the map region
pub const MAP_OFFSET_MASK: u32 = 0x00ff_ffff;

/// Low 23 bits of a trie child entry: child node offset within the trie region
pub const CHILD_OFFSET_MASK: u32 = 0x007f_ffff;

/// Lookahead-barrier bit of a trie child entry. Breadth-first gathering
/// never descends through a child carrying this bit.
pub const CHILD_BARRIER_BIT: u32 = 0x0080_0000;

/// Kind code reserved for alias records (resolved away, never surfaced)
pub const ALIAS_KIND_CODE: u8 = 0;

/// Flags byte of a result-map entry.
///
/// High nibble is the symbol kind code; the low bits tell which optional
/// fields the record body carries and how the UI should label the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordFlags(pub u8);

impl RecordFlags {
    pub const HAS_SUFFIX_LEN: u8 = 1 << 0;
    pub const DEPRECATED: u8 = 1 << 1;
    pub const DELETED: u8 = 1 << 2;
    pub const HAS_PREFIX: u8 = 1 << 3;

    /// Symbol kind code (0 = alias marker, 1..=14 defined kinds)
    pub fn kind_code(&self) -> u8 {
        self.0 >> 4
    }

    pub fn is_alias(&self) -> bool {
        self.kind_code() == ALIAS_KIND_CODE
    }

    pub fn has_prefix(&self) -> bool {
        self.0 & Self::HAS_PREFIX != 0
    }

    pub fn has_suffix_len(&self) -> bool {
        self.0 & Self::HAS_SUFFIX_LEN != 0
    }

    pub fn is_deprecated(&self) -> bool {
        self.0 & Self::DEPRECATED != 0
    }

    pub fn is_deleted(&self) -> bool {
        self.0 & Self::DELETED != 0
    }
}

/// Symbol kind stored in the high nibble of a record's flags byte.
///
/// Code 0 is the alias marker and never reaches the caller; aliases are
/// resolved to their target's kind before a match is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SymbolKind {
    Namespace = 1,
    Class = 2,
    Struct = 3,
    Union = 4,
    Typedef = 5,
    Function = 6,
    Variable = 7,
    Enum = 8,
    Enumerator = 9,
    Define = 10,
    Group = 11,
    Page = 12,
    Directory = 13,
    File = 14,
}

impl SymbolKind {
    /// Decode a kind code. Returns `None` for the alias marker (0) and for
    /// the undefined code 15.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => SymbolKind::Namespace,
            2 => SymbolKind::Class,
            3 => SymbolKind::Struct,
            4 => SymbolKind::Union,
            5 => SymbolKind::Typedef,
            6 => SymbolKind::Function,
            7 => SymbolKind::Variable,
            8 => SymbolKind::Enum,
            9 => SymbolKind::Enumerator,
            10 => SymbolKind::Define,
            11 => SymbolKind::Group,
            12 => SymbolKind::Page,
            13 => SymbolKind::Directory,
            14 => SymbolKind::File,
            _ => return None,
        })
    }

    /// Short display label, as shown next to each match
    pub fn label(&self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Class => "class",
            SymbolKind::Struct => "struct",
            SymbolKind::Union => "union",
            SymbolKind::Typedef => "typedef",
            SymbolKind::Function => "func",
            SymbolKind::Variable => "var",
            SymbolKind::Enum => "enum",
            SymbolKind::Enumerator => "enum val",
            SymbolKind::Define => "define",
            SymbolKind::Group => "group",
            SymbolKind::Page => "page",
            SymbolKind::Directory => "dir",
            SymbolKind::File => "file",
        }
    }
}
