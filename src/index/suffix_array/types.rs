//! Types for suffix array indexing

use serde::{Deserialize, Serialize};

/// Suffix array entry - position in the indexed text
///
/// 32 bits keep the array at four bytes per text byte; texts up to 4 GiB.
pub type SuffixEntry = u32;

/// Configuration for suffix array building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixArrayConfig {
    /// Texts larger than this are sorted with rayon (default: 100k bytes)
    pub parallel_threshold: usize,
    /// Suffixes are ordered by at most this many leading bytes (default: 256).
    /// Longer patterns are matched on their prefix and then verified.
    pub max_compare: usize,
}

impl Default for SuffixArrayConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 100_000,
            max_compare: 256,
        }
    }
}

/// Statistics about a suffix array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixArrayStats {
    pub text_size: usize,
    pub suffix_count: usize,
}
