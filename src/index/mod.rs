//! Corpus indexes.
//!
//! Everything here is built once at load time and read-only afterwards:
//!
//! - [`suffix_array`] - substring search over the normalized corpus
//! - [`paragraphs`] - blank-line paragraph segmentation
//! - [`works`] - titled sub-documents, found through a [`CorpusLayout`]
//! - [`reader`] - [`CorpusIndex`], the bundle of corpus text and indexes

pub mod build;
pub mod corpus;
pub mod paragraphs;
pub mod reader;
pub mod stats;
pub mod suffix_array;
pub mod types;
pub mod works;

pub use build::{build_corpus_index, load_corpus_index};
pub use paragraphs::ParagraphIndex;
pub use reader::CorpusIndex;
pub use types::*;
pub use works::{CorpusLayout, FlatLayout, TableOfContentsLayout, WorkIndex};
