use crate::error::FormatError;
use crate::index::format::{FORMAT_VERSION, HEADER_LEN, MAGIC, MIN_INDEX_LEN};
use crate::index::map::MapView;
use crate::index::trie::TrieView;
use crate::query::SearchSession;
use crate::utils::base85;
use anyhow::{Context, Result};
use memmap2::Mmap;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// Backing storage for an index blob. Downloaded or transport-decoded
/// blobs arrive as owned buffers; on-disk indexes are memory-mapped.
enum IndexData {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl IndexData {
    fn bytes(&self) -> &[u8] {
        match self {
            IndexData::Owned(data) => data,
            IndexData::Mapped(map) => map,
        }
    }
}

/// A parsed, immutable search index.
///
/// Parsing validates the fixed header and slices the blob into the trie and
/// result-map regions; it never scans the interior, so a malformed interior
/// only surfaces later as a `CorruptIndex` error from a search.
pub struct SearchIndex {
    data: IndexData,
    map_offset: usize,
    symbol_count: u16,
}

/// Header-derived statistics, for `dxi stats`
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub data_size: usize,
    pub symbol_count: u16,
    pub trie_bytes: usize,
    pub map_bytes: usize,
}

impl SearchIndex {
    /// Parse an index from an owned byte buffer
    pub fn from_bytes(data: Vec<u8>) -> std::result::Result<Self, FormatError> {
        let (map_offset, symbol_count) = Self::validate(&data)?;
        Ok(Self {
            data: IndexData::Owned(data),
            map_offset,
            symbol_count,
        })
    }

    /// Memory-map and parse an index file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open index file {}", path.display()))?;
        let data = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map index file {}", path.display()))?;

        let (map_offset, symbol_count) = Self::validate(&data)?;
        Ok(Self {
            data: IndexData::Mapped(data),
            map_offset,
            symbol_count,
        })
    }

    /// Decode a base85 transport payload and parse the result
    pub fn from_base85(text: &str) -> Result<Self> {
        let data = base85::decode(text.trim())?;
        Ok(Self::from_bytes(data)?)
    }

    /// Header validation. O(1): magic, version, and the region split.
    fn validate(bytes: &[u8]) -> std::result::Result<(usize, u16), FormatError> {
        if bytes.len() < MIN_INDEX_LEN {
            return Err(FormatError::TooShort { len: bytes.len() });
        }
        if bytes[..3] != MAGIC {
            return Err(FormatError::BadSignature);
        }
        if bytes[3] != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(bytes[3]));
        }

        let symbol_count = u16::from_le_bytes(bytes[4..6].try_into().unwrap());
        let map_offset = u32::from_le_bytes(bytes[6..10].try_into().unwrap()) as usize;

        Ok((map_offset, symbol_count))
    }

    /// Total size of the blob in bytes
    pub fn data_size(&self) -> usize {
        self.data.bytes().len()
    }

    /// Number of symbols in the index (informational; the result map's end
    /// sentinel is what actually bounds record reads)
    pub fn symbol_count(&self) -> u16 {
        self.symbol_count
    }

    /// View over the trie region.
    ///
    /// A hostile `mapOffset` is clamped here rather than rejected at parse
    /// time; the resulting short region makes the first node access fail
    /// with a `CorruptIndex` error instead.
    pub fn trie(&self) -> TrieView<'_> {
        let bytes = self.data.bytes();
        let end = self.map_offset.clamp(HEADER_LEN, bytes.len());
        TrieView::new(&bytes[HEADER_LEN..end])
    }

    /// View over the result-map region
    pub fn map(&self) -> MapView<'_> {
        let bytes = self.data.bytes();
        let start = self.map_offset.clamp(HEADER_LEN, bytes.len());
        MapView::new(&bytes[start..], self.symbol_count)
    }

    /// Start an incremental search session rooted at this index
    pub fn session(&self) -> std::result::Result<SearchSession<'_>, crate::error::CorruptIndex> {
        SearchSession::new(self)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            data_size: self.data_size(),
            symbol_count: self.symbol_count,
            trie_bytes: self.trie().len(),
            map_bytes: self.map().len(),
        }
    }
}
