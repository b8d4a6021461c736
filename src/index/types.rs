use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a paragraph within one [`ParagraphIndex`](super::ParagraphIndex)
pub type ParagraphId = u32;

/// Byte offset into a corpus text
pub type TextOffset = usize;

/// A paragraph: the span between two blank-line separators.
///
/// `from..to` is the paragraph's text, excluding the separator that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: ParagraphId,
    pub from: TextOffset,
    pub to: TextOffset,
}

impl Paragraph {
    /// Length of the paragraph text in bytes
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

/// A titled sub-document of the corpus.
///
/// Spans from the first byte of its heading up to the heading of the next work
/// (or the end of the corpus), both ends inclusive for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub title: String,
    pub from: TextOffset,
    pub to: TextOffset,
}

impl Work {
    pub fn includes(&self, offset: TextOffset) -> bool {
        self.from <= offset && offset <= self.to
    }
}

/// A single search hit rendered as an excerpt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Excerpt lines, bracketed by ellipsis markers
    pub lines: Vec<String>,
    /// Title of the work the excerpt belongs to; empty when unknown
    pub work: String,
}

/// Errors raised while building or querying the corpus indexes
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("no paragraph covers text offset {0}")]
    OffsetNotCovered(TextOffset),

    #[error("paragraph {0} does not exist")]
    ParagraphNotFound(ParagraphId),

    #[error("no work covers text offset {0}")]
    WorkNotFound(TextOffset),

    #[error("failed to split table of contents from body: no run of {0} newlines")]
    MissingSeparator(usize),

    #[error("table of contents has no {0:?} marker")]
    MissingContentsMarker(String),

    #[error("text of {0} bytes is too large to index")]
    TextTooLarge(usize),

    #[error("invalid work title pattern: {0}")]
    TitlePattern(#[from] regex::Error),
}
