use crate::utils::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the words of a query must appear in a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SearchMode {
    /// Every word, in any order or position (`aw`)
    #[default]
    #[serde(rename = "aw")]
    AllWords,
    /// The query as one contiguous substring (`phr`)
    #[serde(rename = "phr")]
    Phrase,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::AllWords => "aw",
            SearchMode::Phrase => "phr",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown search mode {0:?}, expected \"aw\" or \"phr\"")]
pub struct ParseModeError(String);

impl FromStr for SearchMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aw" => Ok(SearchMode::AllWords),
            "phr" => Ok(SearchMode::Phrase),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// A normalized query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub mode: SearchMode,
    /// The whole query after normalization
    pub text: String,
    /// Patterns to look up: the words in all-words mode, the whole text in
    /// phrase mode. Also used to center result snippets.
    pub terms: Vec<String>,
}

impl Query {
    /// A query with nothing to look up matches nothing
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Normalize `raw` and split it into terms according to `mode`
pub fn parse_query(raw: &str, mode: SearchMode) -> Query {
    let text = normalize(raw);

    let terms = match mode {
        SearchMode::AllWords => text.split_whitespace().map(String::from).collect(),
        SearchMode::Phrase if text.trim().is_empty() => Vec::new(),
        SearchMode::Phrase => vec![text.clone()],
    };

    Query { mode, text, terms }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("aw".parse::<SearchMode>().unwrap(), SearchMode::AllWords);
        assert_eq!("phr".parse::<SearchMode>().unwrap(), SearchMode::Phrase);
        assert!("exact".parse::<SearchMode>().is_err());
        assert_eq!(SearchMode::default(), SearchMode::AllWords);
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&SearchMode::Phrase).unwrap(), "\"phr\"");
        let mode: SearchMode = serde_json::from_str("\"aw\"").unwrap();
        assert_eq!(mode, SearchMode::AllWords);
    }

    #[test]
    fn test_all_words_terms() {
        let q = parse_query("  To be,  or NOT to-be ", SearchMode::AllWords);
        assert_eq!(q.terms, vec!["to", "be", "or", "not", "tobe"]);
    }

    #[test]
    fn test_phrase_keeps_whole_text() {
        let q = parse_query("To be, or not", SearchMode::Phrase);
        assert_eq!(q.text, "to be or not");
        assert_eq!(q.terms, vec!["to be or not"]);
    }

    #[test]
    fn test_punctuation_only_is_empty() {
        assert!(parse_query(".,;", SearchMode::AllWords).is_empty());
        assert!(parse_query(" - ", SearchMode::Phrase).is_empty());
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(
            parse_query("The,", SearchMode::AllWords).terms,
            parse_query("the", SearchMode::AllWords).terms
        );
    }
}
