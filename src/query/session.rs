//! Incremental prefix search over a parsed index.
//!
//! Search fires on every keystroke, so a session keeps the trie descent of
//! the previous query alive: one node offset per matched byte plus the
//! root. A new query reuses the longest common byte prefix and only walks
//! the edit distance, not the whole query.

use crate::error::CorruptIndex;
use crate::index::reader::SearchIndex;
use crate::query::gather;
use crate::query::resolve::MatchRecord;

/// Mutable search state bound to one [`SearchIndex`].
///
/// Invariants: `stack[0]` is the root node offset and
/// `stack.len() == prefix.len() + 1` at all times. The session is the only
/// state carried between queries; dropping it loses nothing but the
/// prefix-reuse optimization.
pub struct SearchSession<'a> {
    index: &'a SearchIndex,
    /// Normalized query bytes actually matched by the last search
    prefix: Vec<u8>,
    /// Trie node offsets along the matched path, root first
    stack: Vec<u32>,
}

impl<'a> SearchSession<'a> {
    pub fn new(index: &'a SearchIndex) -> Result<Self, CorruptIndex> {
        let root = index.trie().root()?;
        Ok(Self {
            index,
            prefix: Vec::new(),
            stack: vec![root],
        })
    }

    /// Number of normalized query bytes the last search matched
    pub fn matched_len(&self) -> usize {
        self.prefix.len()
    }

    /// Search for `query`, returning at most `max_results` matches in
    /// breadth-first (shallowest-suffix-first) order.
    ///
    /// A query with no path in the trie is not an error: the result is an
    /// empty vector, and the session keeps the longest matched prefix so a
    /// corrected query stays incremental. The caller may offer an external
    /// search fallback in that case.
    pub fn search(
        &mut self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<MatchRecord>, CorruptIndex> {
        // Comparison is byte-wise over the normalized UTF-8 form
        let normalized = query.trim().to_lowercase().into_bytes();

        let common = self
            .prefix
            .iter()
            .zip(&normalized)
            .take_while(|(a, b)| a == b)
            .count();

        // Drop stack entries beyond the common prefix (the root always stays)
        self.stack.truncate(common + 1);
        self.prefix.truncate(common);

        let trie = self.index.trie();
        for &byte in &normalized[common..] {
            let top = *self.stack.last().unwrap_or(&0);
            let Some(child) = trie.node(top)?.find_child(byte) else {
                break;
            };
            self.stack.push(child.offset);
            self.prefix.push(byte);
        }

        if self.prefix.len() != normalized.len() {
            return Ok(Vec::new());
        }

        let top = *self.stack.last().unwrap_or(&0);
        gather::gather(self.index, top, max_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::format::{FORMAT_VERSION, MAGIC};

    /// Hand-assembled index over {"a" -> 0, "ab" -> 1}; record 1 sits one
    /// edge below record 0.
    fn two_symbol_index() -> SearchIndex {
        let mut trie = Vec::new();
        trie.extend_from_slice(&4u32.to_le_bytes()); // root at offset 4
        // root: no results, child 'a' -> offset 10
        trie.extend_from_slice(&[0, 1]);
        trie.extend_from_slice(&(10u32 | (b'a' as u32) << 24).to_le_bytes());
        // "a": result 0, child 'b' -> offset 18
        trie.extend_from_slice(&[1, 1]);
        trie.extend_from_slice(&0u16.to_le_bytes());
        trie.extend_from_slice(&(18u32 | (b'b' as u32) << 24).to_le_bytes());
        // "ab": result 1, leaf
        trie.extend_from_slice(&[1, 0]);
        trie.extend_from_slice(&1u16.to_le_bytes());

        let mut map = Vec::new();
        map.extend_from_slice(&(12u32 | 0x20 << 24).to_le_bytes());
        map.extend_from_slice(&(20u32 | 0x60 << 24).to_le_bytes());
        map.extend_from_slice(&30u32.to_le_bytes());
        map.extend_from_slice(b"a\0a.html");
        map.extend_from_slice(b"ab\0ab.html");

        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC);
        data.push(FORMAT_VERSION);
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&((10 + trie.len()) as u32).to_le_bytes());
        data.extend_from_slice(&trie);
        data.extend_from_slice(&map);

        SearchIndex::from_bytes(data).unwrap()
    }

    #[test]
    fn test_descent_and_gather() {
        let index = two_symbol_index();
        let mut session = index.session().unwrap();

        let results = session.search("a", 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "a");
        assert_eq!(results[0].suffix_length, 0);
        assert_eq!(results[1].name, "ab");
        assert_eq!(results[1].suffix_length, 1);

        let results = session.search("ab", 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "ab");
        assert_eq!(results[0].url, "ab.html");
    }

    #[test]
    fn test_mismatch_keeps_longest_matched_prefix() {
        let index = two_symbol_index();
        let mut session = index.session().unwrap();

        assert!(session.search("ax", 10).unwrap().is_empty());
        assert_eq!(session.matched_len(), 1); // "a" matched, "x" did not

        // Going back to the matched portion works without re-descending
        let results = session.search("a", 10).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_normalization_lowercases_and_trims() {
        let index = two_symbol_index();
        let mut session = index.session().unwrap();

        let results = session.search("  AB ", 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "ab");
    }

    #[test]
    fn test_empty_query_gathers_from_root() {
        let index = two_symbol_index();
        let mut session = index.session().unwrap();

        let results = session.search("", 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(session.matched_len(), 0);
    }

    #[test]
    fn test_max_results_zero() {
        let index = two_symbol_index();
        let mut session = index.session().unwrap();
        assert!(session.search("a", 0).unwrap().is_empty());
    }
}
