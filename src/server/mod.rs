//! HTTP front end
//!
//! Keeps one [`Searcher`](crate::searcher::Searcher) loaded and answers
//! `GET /search?q=<query>&m=<aw|phr>` with JSON results. A static directory
//! can be served for every other path.

mod http;
pub mod protocol;

pub use http::{router, run_server, ServerConfig};
