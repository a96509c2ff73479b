//! Fixture builder assembling index blobs in the binary format the crate
//! consumes. Only tests build indexes; the production tool that emits them
//! lives with the documentation generator.

#![allow(dead_code)]

/// One trie node under construction
#[derive(Default)]
struct TrieNode {
    results: Vec<u16>,
    /// (character, barrier, child node id)
    children: Vec<(u8, bool, usize)>,
}

/// Builds the trie region: nodes addressed by id, serialized after the
/// 4-byte root pointer.
pub struct TrieBuilder {
    nodes: Vec<TrieNode>,
}

impl TrieBuilder {
    pub fn new() -> Self {
        // Node 0 is the root
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    pub fn add_node(&mut self) -> usize {
        self.nodes.push(TrieNode::default());
        self.nodes.len() - 1
    }

    pub fn add_result(&mut self, node: usize, result: u16) {
        self.nodes[node].results.push(result);
    }

    pub fn add_child(&mut self, parent: usize, ch: u8, barrier: bool, child: usize) {
        self.nodes[parent].children.push((ch, barrier, child));
    }

    /// Walk `name` from the root, creating nodes as needed, and attach
    /// `result` to the final node.
    pub fn insert(&mut self, name: &str, result: u16) {
        let mut node = 0;
        for &byte in name.as_bytes() {
            let existing = self.nodes[node]
                .children
                .iter()
                .find(|(ch, _, _)| *ch == byte)
                .map(|&(_, _, child)| child);
            node = match existing {
                Some(child) => child,
                None => {
                    let child = self.add_node();
                    self.add_child(node, byte, false, child);
                    child
                }
            };
        }
        self.add_result(node, result);
    }

    fn node_len(node: &TrieNode) -> usize {
        2 + node.results.len() * 2 + node.children.len() * 4
    }

    pub fn serialize(&self) -> Vec<u8> {
        // First pass: lay out node offsets after the root pointer
        let mut offsets = Vec::with_capacity(self.nodes.len());
        let mut at = 4usize;
        for node in &self.nodes {
            offsets.push(at as u32);
            at += Self::node_len(node);
        }

        let mut region = Vec::with_capacity(at);
        region.extend_from_slice(&offsets[0].to_le_bytes());
        for node in &self.nodes {
            region.push(node.results.len() as u8);
            region.push(node.children.len() as u8);
            for &result in &node.results {
                region.extend_from_slice(&result.to_le_bytes());
            }
            for &(ch, barrier, child) in &node.children {
                let mut word = offsets[child] | (ch as u32) << 24;
                if barrier {
                    word |= 0x0080_0000;
                }
                region.extend_from_slice(&word.to_le_bytes());
            }
        }
        region
    }
}

/// One result record under construction
#[derive(Default, Clone)]
pub struct RecordSpec {
    pub kind: u8,
    pub alias: Option<u16>,
    /// (target record, URL prefix length cap)
    pub prefix: Option<(u16, u8)>,
    pub suffix_len: Option<u8>,
    pub deprecated: bool,
    pub deleted: bool,
    pub name: String,
    pub url: String,
}

impl RecordSpec {
    pub fn new(kind: u8, name: &str, url: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn alias_to(mut self, target: u16) -> Self {
        self.kind = 0;
        self.alias = Some(target);
        self
    }

    pub fn with_prefix(mut self, target: u16, url_cap: u8) -> Self {
        self.prefix = Some((target, url_cap));
        self
    }

    pub fn with_suffix_len(mut self, len: u8) -> Self {
        self.suffix_len = Some(len);
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    fn flags(&self) -> u8 {
        let mut flags = self.kind << 4;
        if self.suffix_len.is_some() {
            flags |= 1 << 0;
        }
        if self.deprecated {
            flags |= 1 << 1;
        }
        if self.deleted {
            flags |= 1 << 2;
        }
        if self.prefix.is_some() {
            flags |= 1 << 3;
        }
        flags
    }

    fn body(&self) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(target) = self.alias {
            body.extend_from_slice(&target.to_le_bytes());
        }
        if let Some((target, url_cap)) = self.prefix {
            body.extend_from_slice(&target.to_le_bytes());
            body.push(url_cap);
        }
        if let Some(len) = self.suffix_len {
            body.push(len);
        }
        body.extend_from_slice(self.name.as_bytes());
        body.push(0);
        body.extend_from_slice(self.url.as_bytes());
        body
    }
}

/// Serialize the result-map region: entry table (with end sentinel), then
/// the raw record bytes.
pub fn serialize_map(records: &[RecordSpec]) -> Vec<u8> {
    let mut region = Vec::new();
    let mut offset = ((records.len() + 1) * 4) as u32;
    for record in records {
        region.extend_from_slice(&(offset | (record.flags() as u32) << 24).to_le_bytes());
        offset += record.body().len() as u32;
    }
    region.extend_from_slice(&offset.to_le_bytes());
    for record in records {
        region.extend_from_slice(&record.body());
    }
    region
}

/// Assemble a whole blob: header, trie region, result-map region
pub fn build_index(trie: &TrieBuilder, records: &[RecordSpec]) -> Vec<u8> {
    let trie_region = trie.serialize();
    let map_region = serialize_map(records);

    let mut data = Vec::new();
    data.extend_from_slice(b"MCS");
    data.push(0);
    data.extend_from_slice(&(records.len() as u16).to_le_bytes());
    data.extend_from_slice(&((10 + trie_region.len()) as u32).to_le_bytes());
    data.extend_from_slice(&trie_region);
    data.extend_from_slice(&map_region);
    data
}

/// The index most tests share:
///
/// | # | symbol      | kind   | notes                                    |
/// |---|-------------|--------|------------------------------------------|
/// | 0 | `Foo`       | class  | `foo.html`                               |
/// | 1 | `Foo::bar()`| func   | prefix -> 0 (URL cap 8), suffix len 2    |
/// | 2 | `fizz`      | page   | deprecated                               |
/// | 3 | `vector`    | alias  | -> 0                                     |
pub fn sample_index() -> Vec<u8> {
    let mut trie = TrieBuilder::new();
    trie.insert("foo", 0);
    trie.insert("foo::bar", 1);
    trie.insert("bar", 1);
    trie.insert("fizz", 2);
    trie.insert("vector", 3);

    let records = vec![
        RecordSpec::new(2, "Foo", "foo.html"),
        RecordSpec::new(6, "::bar()", "#bar")
            .with_prefix(0, 8)
            .with_suffix_len(2),
        RecordSpec::new(12, "fizz", "fizz.html").deprecated(),
        RecordSpec::new(0, "vector", "").alias_to(0),
    ];

    build_index(&trie, &records)
}
