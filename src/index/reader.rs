use super::paragraphs::ParagraphIndex;
use super::suffix_array::SuffixIndex;
use super::types::{IndexError, Paragraph, ParagraphId, TextOffset, Work};
use super::works::WorkIndex;
use std::sync::Arc;

/// The corpus and every index derived from it.
///
/// Built once by [`build_corpus_index`](super::build::build_corpus_index) and
/// never mutated afterwards, so it can be shared freely between queries.
pub struct CorpusIndex {
    /// Prepared raw corpus text
    raw: String,
    /// Suffix array over the normalized corpus (owns the normalized bytes)
    suffixes: Arc<SuffixIndex>,
    /// Paragraphs in normalized-text offsets, for mapping search hits
    search_paragraphs: Arc<ParagraphIndex>,
    /// Paragraphs in raw-text offsets, for extracting results
    result_paragraphs: ParagraphIndex,
    works: WorkIndex,
}

impl CorpusIndex {
    pub(super) fn new(
        raw: String,
        suffixes: SuffixIndex,
        search_paragraphs: ParagraphIndex,
        result_paragraphs: ParagraphIndex,
        works: WorkIndex,
    ) -> Self {
        Self {
            raw,
            suffixes: Arc::new(suffixes),
            search_paragraphs: Arc::new(search_paragraphs),
            result_paragraphs,
            works,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw
    }

    /// The normalized corpus bytes the suffix array was built over
    pub fn normalized_text(&self) -> &[u8] {
        self.suffixes.text()
    }

    pub fn suffixes(&self) -> &Arc<SuffixIndex> {
        &self.suffixes
    }

    pub fn search_paragraphs(&self) -> &Arc<ParagraphIndex> {
        &self.search_paragraphs
    }

    pub fn result_paragraphs(&self) -> &ParagraphIndex {
        &self.result_paragraphs
    }

    pub fn works(&self) -> &WorkIndex {
        &self.works
    }

    /// Raw span and text of a paragraph
    pub fn paragraph_text(&self, id: ParagraphId) -> Result<(&Paragraph, &str), IndexError> {
        let paragraph = self.result_paragraphs.get(id)?;
        Ok((paragraph, &self.raw[paragraph.from..paragraph.to]))
    }

    /// The work containing a raw-text offset
    pub fn work_for_offset(&self, offset: TextOffset) -> Result<&Work, IndexError> {
        self.works.find_work_by_offset(offset)
    }
}
