//! Suffix array indexing module
//!
//! Exact substring search over the normalized corpus in O(m log n).
//!
//! ## Architecture
//!
//! - `builder`: Sorts the suffixes of a text
//! - `reader`: Binary-search lookup over the sorted suffixes
//! - `types`: Configuration and statistics

pub mod builder;
pub mod reader;
pub mod types;

pub use builder::SuffixArrayBuilder;
pub use reader::SuffixIndex;
pub use types::{SuffixArrayConfig, SuffixArrayStats, SuffixEntry};
