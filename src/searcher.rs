use crate::index::build::{build_corpus_index, load_corpus_index};
use crate::index::corpus::prepare_corpus;
use crate::index::reader::CorpusIndex;
use crate::index::types::{IndexError, SearchResult};
use crate::index::works::{CorpusLayout, TableOfContentsLayout};
use crate::query::{parse_query, Query, QueryExecutor, SearchMode, SnippetConfig, SnippetExtractor};
use anyhow::Result;
use std::path::Path;
use std::time::Instant;

/// A loaded corpus, ready to answer queries
pub struct Searcher {
    index: CorpusIndex,
    snippets: SnippetExtractor,
}

impl Searcher {
    /// Load a corpus laid out with a table of contents
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_layout(path, &TableOfContentsLayout::default(), true)
    }

    pub fn load_with_layout(path: &Path, layout: &dyn CorpusLayout, silent: bool) -> Result<Self> {
        let index = load_corpus_index(path, layout, silent)?;
        Ok(Self::from_index(index))
    }

    /// Index in-memory text; it is prepared the same way a corpus file is
    pub fn from_text(text: &str, layout: &dyn CorpusLayout) -> Result<Self, IndexError> {
        let index = build_corpus_index(prepare_corpus(text), layout)?;
        Ok(Self::from_index(index))
    }

    pub fn from_index(index: CorpusIndex) -> Self {
        Self {
            index,
            snippets: SnippetExtractor::default(),
        }
    }

    pub fn with_snippet_config(mut self, config: SnippetConfig) -> Self {
        self.snippets = SnippetExtractor::new(config);
        self
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    /// Run `query` in `mode`; results follow corpus order
    pub fn search(&self, query: &str, mode: SearchMode) -> Vec<SearchResult> {
        self.search_query(&parse_query(query, mode))
    }

    pub fn search_query(&self, query: &Query) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }

        let start = Instant::now();
        let ids = QueryExecutor::new(&self.index).execute(query);

        let mut results = Vec::with_capacity(ids.len() as usize);
        for id in &ids {
            match self.snippets.extract(&self.index, id, &query.terms) {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::error!(paragraph = id, error = %e, "dropping result without snippet");
                }
            }
        }

        tracing::debug!(
            query = %query.text,
            mode = %query.mode,
            results = results.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "search complete"
        );
        results
    }
}
