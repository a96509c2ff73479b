//! # DXI - Documentation Symbol Search
//!
//! DXI is the client-side query engine for a static documentation site's
//! search box: incremental prefix search over a precomputed, compactly
//! encoded trie index, returning ranked symbol matches (names, URLs, kind
//! and display metadata) as the user types.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Binary index parsing and region decoding (trie + result map)
//! - [`query`] - Incremental search sessions, result gathering and resolution
//! - [`output`] - Result formatting (terminal colors, JSON)
//! - [`utils`] - Utility functions (base85 transport codec)
//! - `tui` - Interactive search-as-you-type UI (feature `interactive`)
//!
//! ## Quick Start
//!
//! ```ignore
//! use dxi::SearchIndex;
//! use std::path::Path;
//!
//! // Parse a downloaded or memory-mapped index blob
//! let index = SearchIndex::open(Path::new("searchdata.bin")).unwrap();
//!
//! // A session keeps the trie descent alive between keystrokes
//! let mut session = index.session().unwrap();
//! for result in session.search("vec", 100).unwrap() {
//!     println!("{:>9} {} {}", result.kind.label(), result.name, result.url);
//! }
//! ```
//!
//! ## Performance
//!
//! The index is parsed in O(1) (header validation and region slicing only)
//! and never copied or scanned up front. Each query reuses the trie descent
//! of the previous one, so a keystroke costs a walk over the edit distance,
//! not the query length; result gathering is breadth-first and capped, which
//! bounds both time and memory per query regardless of index size.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;

pub use error::{CorruptIndex, FormatError, TransportError};
pub use index::format::{RecordFlags, SymbolKind};
pub use index::reader::{IndexStats, SearchIndex};
pub use query::{MatchRecord, SearchSession};
