//! Request and response shapes of the HTTP interface
//!
//! Successful searches return a JSON array of [`SearchResult`] objects:
//!
//! ```json
//! [{ "lines": ["[...]", "Who's there?", "[...]"], "work": "THE TRAGEDY OF HAMLET" }]
//! ```
//!
//! Errors are returned as plain-text bodies with a 4xx/5xx status.
//!
//! [`SearchResult`]: crate::index::SearchResult

use serde::{Deserialize, Serialize};

/// URL parameters of `GET /search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// The raw query text
    pub q: Option<String>,
    /// Search mode, `aw` (all words, the default) or `phr` (phrase)
    pub m: Option<String>,
}

/// Body of `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Paragraphs in the loaded corpus
    pub paragraphs: usize,
    /// Titled works in the loaded corpus
    pub works: usize,
    /// Search requests answered
    pub queries_served: u64,
    /// Fraction of searches answered from the result cache (0.0 - 1.0)
    pub cache_hit_rate: f32,
}
