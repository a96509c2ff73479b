//! Breadth-first collection of results under a matched prefix node.

use crate::error::CorruptIndex;
use crate::index::reader::SearchIndex;
use crate::query::resolve::{self, MatchRecord};
use std::collections::VecDeque;

/// Collect up to `max_results` matches below `root`, shallowest first.
///
/// Children are visited in stored order. A child carrying the lookahead
/// barrier is never entered from here; the depth limit it encodes was
/// decided by the index builder. `suffix_depth` counts the edges walked
/// past the typed prefix and is threaded into resolution for display
/// slicing.
pub(crate) fn gather(
    index: &SearchIndex,
    root: u32,
    max_results: usize,
) -> Result<Vec<MatchRecord>, CorruptIndex> {
    let mut results = Vec::new();
    if max_results == 0 {
        return Ok(results);
    }

    let trie = index.trie();
    let map = index.map();

    let mut queue = VecDeque::new();
    queue.push_back((root, 0usize));

    while let Some((offset, suffix_depth)) = queue.pop_front() {
        let node = trie.node(offset)?;

        for result_index in node.result_indices() {
            results.push(resolve::resolve(&map, result_index, suffix_depth)?);
            if results.len() >= max_results {
                return Ok(results);
            }
        }

        for child in node.children() {
            if !child.barrier {
                queue.push_back((child.offset, suffix_depth + 1));
            }
        }
    }

    Ok(results)
}
