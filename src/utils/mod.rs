//! Utility functions shared by the indexes and the query engine.
//!
//! ## Modules
//!
//! - [`normalize`] - Punctuation stripping and lowercasing for corpus and queries
//! - [`cancel`] - Cancellation flag shared by concurrent term searches
//! - [`progress`] - Indexing spinner (no-op without the `progress` feature)
//!
//! ```
//! use folio::utils::normalize;
//!
//! assert_eq!(normalize("The,"), normalize("the"));
//! ```

pub mod cancel;
pub mod normalize;
pub mod progress;

pub use cancel::CancelToken;
pub use normalize::{normalize, normalize_into};
