//! Suffix array builder
//!
//! Sorts every suffix position of the normalized corpus. The resulting array
//! enables O(m log n) substring search.

use super::reader::SuffixIndex;
use super::types::*;
use crate::index::types::IndexError;
use rayon::prelude::*;

/// Builder for constructing a [`SuffixIndex`] over one text
pub struct SuffixArrayBuilder {
    config: SuffixArrayConfig,
}

impl SuffixArrayBuilder {
    pub fn new(config: SuffixArrayConfig) -> Self {
        Self { config }
    }

    /// Create a builder with default configuration
    pub fn with_defaults() -> Self {
        Self::new(SuffixArrayConfig::default())
    }

    /// Build the suffix array for `text`, taking ownership of it.
    ///
    /// This is the main computation - sorts all suffixes, in parallel for
    /// large texts.
    pub fn build(self, text: Vec<u8>) -> Result<SuffixIndex, IndexError> {
        if text.len() > SuffixEntry::MAX as usize {
            return Err(IndexError::TextTooLarge(text.len()));
        }

        let suffix_array = build_suffix_array(&text, &self.config);
        Ok(SuffixIndex::new(text, suffix_array, self.config.max_compare))
    }
}

/// Build suffix array by sorting positions
///
/// Time: O(n log n) comparisons, each bounded by `max_compare` bytes
/// Space: O(n) for the suffix array
fn build_suffix_array(text: &[u8], config: &SuffixArrayConfig) -> Vec<SuffixEntry> {
    let n = text.len();
    let max_compare = config.max_compare;

    let mut sa: Vec<SuffixEntry> = (0..n as SuffixEntry).collect();

    if n > config.parallel_threshold {
        sa.par_sort_unstable_by(|&a, &b| {
            compare_suffixes(text, a as usize, b as usize, max_compare)
        });
    } else {
        sa.sort_unstable_by(|&a, &b| compare_suffixes(text, a as usize, b as usize, max_compare));
    }

    sa
}

/// Compare two suffixes lexicographically on at most `max_compare` bytes
#[inline]
fn compare_suffixes(text: &[u8], a: usize, b: usize, max_compare: usize) -> std::cmp::Ordering {
    let len_a = (text.len() - a).min(max_compare);
    let len_b = (text.len() - b).min(max_compare);

    text[a..a + len_a].cmp(&text[b..b + len_b])
}
