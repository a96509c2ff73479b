//! Shared utilities.
//!
//! - [`base85`] - ASCII-safe transport codec for embedded index blobs

pub mod base85;
