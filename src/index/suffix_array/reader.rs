//! In-memory suffix array search
//!
//! Provides O(m log n) lookup of every occurrence of a pattern.

use super::types::*;
use crate::index::types::TextOffset;

/// A text together with its sorted suffix array.
///
/// Read-only once built; safe to share across threads.
pub struct SuffixIndex {
    /// Indexed (normalized) text
    text: Vec<u8>,
    /// Sorted suffix positions into `text`
    suffix_array: Vec<SuffixEntry>,
    /// Number of leading bytes the array was sorted by
    max_compare: usize,
}

impl SuffixIndex {
    pub(super) fn new(text: Vec<u8>, suffix_array: Vec<SuffixEntry>, max_compare: usize) -> Self {
        Self {
            text,
            suffix_array,
            max_compare,
        }
    }

    /// Get the full indexed text
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    #[inline]
    fn suffix(&self, i: usize) -> &[u8] {
        &self.text[self.suffix_array[i] as usize..]
    }

    /// Every offset at which `pattern` occurs, in ascending order.
    ///
    /// Empty when the pattern is empty or does not occur.
    pub fn lookup(&self, pattern: &[u8]) -> Vec<TextOffset> {
        let (lo, hi) = self.search(pattern);
        let long = pattern.len() > self.max_compare;

        let mut offsets: Vec<TextOffset> = self.suffix_array[lo..hi]
            .iter()
            .map(|&pos| pos as TextOffset)
            .filter(|&pos| !long || self.text[pos..].starts_with(pattern))
            .collect();
        offsets.sort_unstable();
        offsets
    }

    /// Get the number of occurrences of a pattern
    pub fn count_matches(&self, pattern: &[u8]) -> usize {
        if pattern.len() > self.max_compare {
            return self.lookup(pattern).len();
        }
        let (lo, hi) = self.search(pattern);
        hi - lo
    }

    /// Check if pattern occurs anywhere in the text
    pub fn contains(&self, pattern: &[u8]) -> bool {
        self.count_matches(pattern) > 0
    }

    /// Range [lo, hi) of suffix array indices whose suffixes start with the
    /// first `max_compare` bytes of `pattern`.
    fn search(&self, pattern: &[u8]) -> (usize, usize) {
        if pattern.is_empty() || self.suffix_array.is_empty() {
            return (0, 0);
        }

        let prefix = &pattern[..pattern.len().min(self.max_compare)];
        let lo = self.lower_bound(prefix);
        let hi = self.upper_bound(prefix, lo);
        (lo, hi)
    }

    /// Find first index where suffix starts with pattern (or would if inserted)
    fn lower_bound(&self, pattern: &[u8]) -> usize {
        let mut lo = 0;
        let mut hi = self.suffix_array.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let suffix = self.suffix(mid);

            // Compare only up to pattern length
            let cmp_len = pattern.len().min(suffix.len());
            if &suffix[..cmp_len] < pattern {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Find first index at or after `start` where suffix does NOT start with pattern
    fn upper_bound(&self, pattern: &[u8], start: usize) -> usize {
        let mut lo = start;
        let mut hi = self.suffix_array.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.suffix(mid).starts_with(pattern) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    pub fn stats(&self) -> SuffixArrayStats {
        SuffixArrayStats {
            text_size: self.text.len(),
            suffix_count: self.suffix_array.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::index::suffix_array::{SuffixArrayBuilder, SuffixArrayConfig};

    fn build(text: &str) -> super::SuffixIndex {
        SuffixArrayBuilder::with_defaults()
            .build(text.as_bytes().to_vec())
            .unwrap()
    }

    fn naive_lookup(text: &str, pattern: &str) -> Vec<usize> {
        text.match_indices(pattern).map(|(i, _)| i).collect::<Vec<_>>()
    }

    #[test]
    fn test_lookup_basic() {
        let index = build("hello world\nworld hello");
        assert_eq!(index.lookup(b"hello"), vec![0, 18]);
        assert_eq!(index.lookup(b"world"), vec![6, 12]);
    }

    #[test]
    fn test_lookup_overlapping() {
        let index = build("aaaa");
        assert_eq!(index.lookup(b"aa"), vec![0, 1, 2]);
    }

    #[test]
    fn test_lookup_no_match() {
        let index = build("hello world");
        assert!(index.lookup(b"notfound").is_empty());
        assert!(!index.contains(b"xyz123"));
    }

    #[test]
    fn test_lookup_empty_pattern() {
        let index = build("hello world");
        assert!(index.lookup(b"").is_empty());
        assert_eq!(index.count_matches(b""), 0);
    }

    #[test]
    fn test_lookup_at_text_end() {
        let index = build("the end");
        assert_eq!(index.lookup(b"end"), vec![4]);
        assert!(index.lookup(b"ends").is_empty());
    }

    #[test]
    fn test_count_matches() {
        let index = build("to be or not to be");
        assert_eq!(index.count_matches(b"to be"), 2);
        assert_eq!(index.count_matches(b"o"), 4);
    }

    #[test]
    fn test_matches_naive_search() {
        let text = "now is the winter of our discontent made glorious summer by this sun of york";
        let index = build(text);
        for pattern in ["o", "of", "the", "s", "summer by", "york", " ", "zz"] {
            assert_eq!(index.lookup(pattern.as_bytes()), naive_lookup(text, pattern), "{pattern}");
        }
    }

    #[test]
    fn test_patterns_longer_than_compare_window() {
        let config = SuffixArrayConfig {
            max_compare: 4,
            ..Default::default()
        };
        let text = "abcdefgh abcdxyz abcdefgh abcdefzz";
        let index = SuffixArrayBuilder::new(config)
            .build(text.as_bytes().to_vec())
            .unwrap();

        assert_eq!(index.lookup(b"abcdefgh"), vec![0, 17]);
        assert_eq!(index.lookup(b"abcdef"), vec![0, 17, 26]);
        assert_eq!(index.count_matches(b"abcdxyz"), 1);
    }
}
