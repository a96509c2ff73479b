//! Stateless decoding of trie nodes out of the trie region.
//!
//! Node layout at byte offset `o`:
//!
//! ```text
//! o+0  resultCount: u8
//! o+1  childCount:  u8
//! o+2  resultCount x resultIndex: u16 LE
//!  ..  childCount x childEntry:   u32 LE
//! ```
//!
//! A child entry packs a 23-bit child offset, the lookahead-barrier bit and
//! the matched character in the most significant byte. Offsets are relative
//! to the trie region, never to the whole blob.

use crate::error::CorruptIndex;
use crate::index::format::{CHILD_BARRIER_BIT, CHILD_OFFSET_MASK};

/// Borrowed view over the trie region
#[derive(Debug, Clone, Copy)]
pub struct TrieView<'a> {
    bytes: &'a [u8],
}

/// One decoded child transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRef {
    /// Offset of the child node within the trie region
    pub offset: u32,
    /// Lookahead barrier: result gathering does not descend through this edge
    pub barrier: bool,
    /// The matched character (a single UTF-8 byte)
    pub byte: u8,
}

/// A bounds-checked trie node. Constructed only by [`TrieView::node`], so
/// the result and child tables are known to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<'a> {
    result_count: u8,
    child_count: u8,
    /// Result and child tables, starting right after the two count bytes
    tables: &'a [u8],
}

impl<'a> TrieView<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Size of the trie region in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Offset of the root node, stored in the region's first four bytes
    pub fn root(&self) -> Result<u32, CorruptIndex> {
        let bytes = self
            .bytes
            .get(..4)
            .ok_or(CorruptIndex::NodeOutOfBounds { offset: 0 })?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    /// Decode the node starting at `offset`, validating its full extent
    pub fn node(&self, offset: u32) -> Result<Node<'a>, CorruptIndex> {
        let oob = CorruptIndex::NodeOutOfBounds { offset };
        let start = offset as usize;
        let header = self.bytes.get(start..start + 2).ok_or(oob)?;
        let (result_count, child_count) = (header[0], header[1]);

        let tables_len = result_count as usize * 2 + child_count as usize * 4;
        let tables = self
            .bytes
            .get(start + 2..start + 2 + tables_len)
            .ok_or(oob)?;

        Ok(Node {
            result_count,
            child_count,
            tables,
        })
    }
}

impl<'a> Node<'a> {
    pub fn result_count(&self) -> usize {
        self.result_count as usize
    }

    pub fn child_count(&self) -> usize {
        self.child_count as usize
    }

    /// Indices into the result map, in stored order
    pub fn result_indices(&self) -> impl Iterator<Item = u16> + 'a {
        let table = &self.tables[..self.result_count as usize * 2];
        table
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes(pair.try_into().unwrap()))
    }

    /// Child transitions, in stored order
    pub fn children(&self) -> impl Iterator<Item = ChildRef> + 'a {
        let table = &self.tables[self.result_count as usize * 2..];
        table.chunks_exact(4).map(|quad| {
            let word = u32::from_le_bytes(quad.try_into().unwrap());
            ChildRef {
                offset: word & CHILD_OFFSET_MASK,
                barrier: word & CHILD_BARRIER_BIT != 0,
                byte: quad[3],
            }
        })
    }

    /// Find the child matching `byte`. Nodes hold at most one entry per
    /// character, so the first hit wins.
    pub fn find_child(&self, byte: u8) -> Option<ChildRef> {
        self.children().find(|child| child.byte == byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One node with two results (7, 0x0102) and two children:
    /// 'a' -> offset 0x10, 'b' -> offset 0x20 behind a barrier.
    fn sample_region() -> Vec<u8> {
        let mut region = vec![0u8; 4];
        region[..4].copy_from_slice(&4u32.to_le_bytes()); // root at offset 4
        region.extend_from_slice(&[2, 2]); // resultCount, childCount
        region.extend_from_slice(&7u16.to_le_bytes());
        region.extend_from_slice(&0x0102u16.to_le_bytes());
        region.extend_from_slice(&(0x10u32 | (b'a' as u32) << 24).to_le_bytes());
        region.extend_from_slice(&(0x20u32 | CHILD_BARRIER_BIT | (b'b' as u32) << 24).to_le_bytes());
        region
    }

    #[test]
    fn test_node_decoding() {
        let region = sample_region();
        let trie = TrieView::new(&region);

        let root = trie.root().unwrap();
        assert_eq!(root, 4);

        let node = trie.node(root).unwrap();
        assert_eq!(node.result_count(), 2);
        assert_eq!(node.child_count(), 2);
        assert_eq!(node.result_indices().collect::<Vec<_>>(), vec![7, 0x0102]);

        let children: Vec<_> = node.children().collect();
        assert_eq!(
            children[0],
            ChildRef {
                offset: 0x10,
                barrier: false,
                byte: b'a'
            }
        );
        assert_eq!(
            children[1],
            ChildRef {
                offset: 0x20,
                barrier: true,
                byte: b'b'
            }
        );

        assert_eq!(node.find_child(b'a').unwrap().offset, 0x10);
        assert_eq!(node.find_child(b'z'), None);
    }

    #[test]
    fn test_character_occupies_top_byte() {
        // 23-bit offset all ones must not leak into the character or barrier
        let mut region = vec![0u8; 4];
        region.extend_from_slice(&[0, 1]);
        region.extend_from_slice(&(CHILD_OFFSET_MASK | (b'x' as u32) << 24).to_le_bytes());

        let trie = TrieView::new(&region);
        let child = trie.node(4).unwrap().children().next().unwrap();
        assert_eq!(child.offset, CHILD_OFFSET_MASK);
        assert_eq!(child.byte, b'x');
        assert!(!child.barrier);
    }

    #[test]
    fn test_out_of_bounds_node() {
        let region = sample_region();
        let trie = TrieView::new(&region);

        assert_eq!(
            trie.node(region.len() as u32),
            Err(CorruptIndex::NodeOutOfBounds {
                offset: region.len() as u32
            })
        );
        // Header in range but tables truncated
        assert!(trie.node(region.len() as u32 - 3).is_err());
    }

    #[test]
    fn test_empty_region_has_no_root() {
        let trie = TrieView::new(&[]);
        assert!(trie.root().is_err());
    }
}
