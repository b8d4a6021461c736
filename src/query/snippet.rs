//! Snippet extraction. The compiled-pattern cache is the only state shared
//! between queries, and its mutex guards nothing else.

use crate::index::reader::CorpusIndex;
use crate::index::types::{IndexError, ParagraphId, SearchResult, TextOffset};
use lru::LruCache;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

/// Shaping of result snippets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    /// Paragraphs with more lines than this are cut down around the match
    pub max_lines: usize,
    /// Marker placed before and after every snippet
    pub ellipsis: String,
    /// Anchor offset used when no term occurs in the raw paragraph
    pub default_anchor: TextOffset,
    /// Compiled term patterns kept for repeated queries
    pub pattern_cache_size: usize,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            max_lines: 10,
            ellipsis: "[...]".to_string(),
            default_anchor: 0,
            pattern_cache_size: 64,
        }
    }
}

/// Turns a matching paragraph into a displayable result
pub struct SnippetExtractor {
    config: SnippetConfig,
    patterns: Mutex<LruCache<Vec<String>, Regex>>,
}

impl SnippetExtractor {
    pub fn new(config: SnippetConfig) -> Self {
        let capacity = NonZeroUsize::new(config.pattern_cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            patterns: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn config(&self) -> &SnippetConfig {
        &self.config
    }

    /// Build the result for paragraph `id`, centered on the middle occurrence
    /// of any of `terms`
    pub fn extract(
        &self,
        index: &CorpusIndex,
        id: ParagraphId,
        terms: &[String],
    ) -> Result<SearchResult, IndexError> {
        let (paragraph, text) = index.paragraph_text(id)?;

        let work = match index.work_for_offset(paragraph.from) {
            Ok(work) => work.title.clone(),
            Err(_) => String::new(),
        };

        let anchor = self.central_match(text, terms).unwrap_or_else(|| {
            tracing::debug!(paragraph = id, "no term found in raw paragraph, using default anchor");
            self.config.default_anchor
        });

        let lines: Vec<&str> = text.split('\n').collect();
        let window = if lines.len() > self.config.max_lines {
            let target = line_for_offset(&lines, anchor);
            balance_lines(&lines, target, self.config.max_lines)
        } else {
            &lines[..]
        };

        let mut out = Vec::with_capacity(window.len() + 2);
        out.push(self.config.ellipsis.clone());
        out.extend(window.iter().map(|line| line.to_string()));
        out.push(self.config.ellipsis.clone());

        Ok(SearchResult { lines: out, work })
    }

    /// Start of the middle case-insensitive occurrence of any term
    fn central_match(&self, text: &str, terms: &[String]) -> Option<TextOffset> {
        let pattern = self.term_pattern(terms)?;
        let starts: Vec<TextOffset> = pattern.find_iter(text).map(|m| m.start()).collect();
        starts.get(starts.len() / 2).copied()
    }

    fn term_pattern(&self, terms: &[String]) -> Option<Regex> {
        if terms.is_empty() {
            return None;
        }

        let mut cache = self.patterns.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pattern) = cache.get(terms) {
            return Some(pattern.clone());
        }

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        match Regex::new(&format!("(?i)(?:{alternation})")) {
            Ok(pattern) => {
                cache.put(terms.to_vec(), pattern.clone());
                Some(pattern)
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not compile term pattern");
                None
            }
        }
    }
}

impl Default for SnippetExtractor {
    fn default() -> Self {
        Self::new(SnippetConfig::default())
    }
}

/// Index of the first line whose running length total passes `offset`,
/// or `lines.len()` when it never does. Newlines are not counted.
fn line_for_offset(lines: &[&str], offset: TextOffset) -> usize {
    let mut total = 0;
    for (i, line) in lines.iter().enumerate() {
        total += line.len();
        if total > offset {
            return i;
        }
    }
    lines.len()
}

/// A window of `budget` lines around `target`, shifted inward near the
/// ends of the paragraph
fn balance_lines<'a, 'b>(lines: &'b [&'a str], target: usize, budget: usize) -> &'b [&'a str] {
    let start = target.saturating_sub(budget);
    let end = (target + budget).min(lines.len());
    let mid = (start + end) / 2;
    let half = budget / 2;

    let from = mid.saturating_sub(half);
    let to = (mid + half).min(lines.len());
    &lines[from..to]
}
