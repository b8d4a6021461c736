//! # Folio - in-memory search over a literary corpus
//!
//! Folio loads one static corpus (a collection of plays, poems, letters),
//! indexes it once and answers two kinds of queries:
//!
//! - **phrase** (`phr`): the query as one contiguous, case- and
//!   punctuation-insensitive substring
//! - **all words** (`aw`): every word of the query somewhere in the same
//!   paragraph, in any order
//!
//! Each hit comes back as a short excerpt of its paragraph together with the
//! title of the work it belongs to.
//!
//! ## Architecture
//!
//! - [`index`] - corpus loading, suffix array, paragraph and work indexes
//! - [`query`] - query parsing, concurrent term search, snippet extraction
//! - [`searcher`] - [`Searcher`], the entry point tying the two together
//! - [`server`] - HTTP interface (feature `server`)
//! - [`output`] - terminal rendering of results
//! - [`utils`] - text normalization, cancellation, progress display
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio::query::SearchMode;
//! use folio::Searcher;
//! use std::path::Path;
//!
//! let searcher = Searcher::load(Path::new("completeworks.txt")).unwrap();
//!
//! for result in searcher.search("to be or not", SearchMode::Phrase) {
//!     println!("{}", result.work);
//!     for line in &result.lines {
//!         println!("  {}", line);
//!     }
//! }
//! ```
//!
//! ## Text representations
//!
//! Search runs over a normalized copy of the corpus (lowercase, a few
//! punctuation characters removed) while excerpts are cut from the original
//! text. Both copies are split into the same paragraphs, so a paragraph id
//! found in one is valid in the other.

pub mod index;
pub mod output;
pub mod query;
pub mod searcher;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

pub use index::{IndexError, SearchResult};
pub use searcher::Searcher;
