pub mod executor;
pub mod parser;
pub mod snippet;

pub use executor::QueryExecutor;
pub use parser::{parse_query, ParseModeError, Query, SearchMode};
pub use snippet::{SnippetConfig, SnippetExtractor};
