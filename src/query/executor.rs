use crate::index::paragraphs::ParagraphIndex;
use crate::index::reader::CorpusIndex;
use crate::index::suffix_array::SuffixIndex;
use crate::index::types::ParagraphId;
use crate::query::parser::{parse_query, Query, SearchMode};
use crate::utils::CancelToken;
use roaring::RoaringBitmap;
use std::sync::{mpsc, Arc};

/// Resolves queries to the set of matching paragraph ids
pub struct QueryExecutor<'a> {
    index: &'a CorpusIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a CorpusIndex) -> Self {
        Self { index }
    }

    /// Normalize `raw`, run it in `mode` and return matching paragraph ids in
    /// ascending order together with the terms used
    pub fn search(&self, raw: &str, mode: SearchMode) -> (Vec<ParagraphId>, Vec<String>) {
        let query = parse_query(raw, mode);
        let ids = self.execute(&query);
        (ids.iter().collect(), query.terms)
    }

    /// Run a parsed query
    pub fn execute(&self, query: &Query) -> RoaringBitmap {
        match query.mode {
            SearchMode::AllWords => self.search_all_words(&query.terms),
            SearchMode::Phrase => match query.terms.first() {
                Some(phrase) => self.search_phrase(phrase),
                None => RoaringBitmap::new(),
            },
        }
    }

    /// Paragraphs containing `pattern` as an exact substring of the
    /// normalized corpus
    pub fn search_phrase(&self, pattern: &str) -> RoaringBitmap {
        phrase_paragraphs(
            self.index.suffixes(),
            self.index.search_paragraphs(),
            pattern.as_bytes(),
        )
    }

    /// Paragraphs containing every term, in any order.
    ///
    /// Each term is searched by its own task; the first term without matches
    /// ends the search early.
    pub fn search_all_words(&self, terms: &[String]) -> RoaringBitmap {
        match terms {
            [] => RoaringBitmap::new(),
            [term] => self.search_phrase(term),
            _ => {
                let suffixes = Arc::clone(self.index.suffixes());
                let paragraphs = Arc::clone(self.index.search_paragraphs());
                gather_term_results(terms, move |term| {
                    phrase_paragraphs(&suffixes, &paragraphs, term.as_bytes())
                })
            }
        }
    }
}

/// Map every occurrence of `pattern` to its paragraph
fn phrase_paragraphs(
    suffixes: &SuffixIndex,
    paragraphs: &ParagraphIndex,
    pattern: &[u8],
) -> RoaringBitmap {
    let mut ids = RoaringBitmap::new();

    for offset in suffixes.lookup(pattern) {
        match paragraphs.paragraph_for_offset(offset) {
            Ok(id) => {
                ids.insert(id);
            }
            Err(e) => {
                // Paragraph coverage is total; reaching this is an indexing bug
                tracing::error!(offset, error = %e, "search hit outside every paragraph, skipping");
            }
        }
    }

    ids
}

/// Search every term on the rayon pool and intersect the results.
///
/// Results arrive over a channel with room for every term, so a task never
/// blocks when reporting. As soon as one term comes back empty the shared
/// token is cancelled and this returns without waiting for the others; tasks
/// check the token before searching and before reporting.
fn gather_term_results<F>(terms: &[String], search: F) -> RoaringBitmap
where
    F: Fn(&str) -> RoaringBitmap + Clone + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(terms.len());
    let cancel = CancelToken::new();

    for term in terms {
        let term = term.clone();
        let tx = tx.clone();
        let cancel = cancel.clone();
        let search = search.clone();

        rayon::spawn(move || {
            if cancel.is_cancelled() {
                return;
            }
            let ids = search(&term);
            if cancel.is_cancelled() {
                return;
            }
            let _ = tx.send(ids);
        });
    }
    drop(tx);

    let mut partials = Vec::with_capacity(terms.len());
    while partials.len() < terms.len() {
        let Ok(ids) = rx.recv() else {
            tracing::error!(
                reported = partials.len(),
                terms = terms.len(),
                "term search task exited without reporting"
            );
            cancel.cancel();
            return RoaringBitmap::new();
        };

        if ids.is_empty() {
            tracing::debug!(
                pending = terms.len() - partials.len() - 1,
                "term has no matches, cancelling remaining searches"
            );
            cancel.cancel();
            return RoaringBitmap::new();
        }
        partials.push(ids);
    }

    intersect(partials)
}

/// Intersection of all sets; empty when there are none
fn intersect(mut sets: Vec<RoaringBitmap>) -> RoaringBitmap {
    // Smallest first keeps the running intersection small
    sets.sort_by_key(|s| s.len());

    let mut iter = sets.into_iter();
    let Some(mut result) = iter.next() else {
        return RoaringBitmap::new();
    };
    for set in iter {
        result &= set;
        if result.is_empty() {
            break;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build::build_corpus_index;
    use crate::index::works::FlatLayout;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Paragraphs: 0 gamma, 1 alpha, 2 gamma, 3 alpha beta, 4 gamma,
    /// 5 beta alpha, 6 gamma, 7 beta
    const CORPUS: &str = "gamma\n\nalpha\n\ngamma\n\nalpha beta\n\ngamma\n\nbeta alpha\n\ngamma\n\nbeta";

    fn bitmap(ids: &[u32]) -> RoaringBitmap {
        ids.iter().copied().collect()
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_search_phrase() {
        let index = build_corpus_index(CORPUS.to_string(), &FlatLayout).unwrap();
        let executor = QueryExecutor::new(&index);

        assert_eq!(executor.search_phrase("alpha"), bitmap(&[1, 3, 5]));
        assert_eq!(executor.search_phrase("beta"), bitmap(&[3, 5, 7]));
        assert_eq!(executor.search_phrase("alpha beta"), bitmap(&[3]));
        assert!(executor.search_phrase("delta").is_empty());
    }

    #[test]
    fn test_search_all_words_intersects() {
        let index = build_corpus_index(CORPUS.to_string(), &FlatLayout).unwrap();
        let executor = QueryExecutor::new(&index);

        assert_eq!(executor.search_all_words(&terms(&["alpha", "beta"])), bitmap(&[3, 5]));
        assert_eq!(executor.search_all_words(&terms(&["beta", "alpha"])), bitmap(&[3, 5]));
    }

    #[test]
    fn test_search_all_words_missing_term() {
        let index = build_corpus_index(CORPUS.to_string(), &FlatLayout).unwrap();
        let executor = QueryExecutor::new(&index);

        assert!(executor.search_all_words(&terms(&["alpha", "delta"])).is_empty());
        assert!(executor.search_all_words(&terms(&["delta", "alpha", "beta"])).is_empty());
        assert!(executor.search_all_words(&[]).is_empty());
    }

    #[test]
    fn test_search_dispatches_on_mode() {
        let index = build_corpus_index(CORPUS.to_string(), &FlatLayout).unwrap();
        let executor = QueryExecutor::new(&index);

        let (ids, used) = executor.search("Beta, ALPHA", SearchMode::AllWords);
        assert_eq!(ids, vec![3, 5]);
        assert_eq!(used, terms(&["beta", "alpha"]));

        let (ids, used) = executor.search("Beta alpha.", SearchMode::Phrase);
        assert_eq!(ids, vec![5]);
        assert_eq!(used, terms(&["beta alpha"]));

        let (ids, _) = executor.search("...", SearchMode::Phrase);
        assert!(ids.is_empty());
    }

    #[test]
    fn test_gather_returns_without_waiting_for_cancelled_tasks() {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Arc::new(Mutex::new(release_rx));
        let finished = Arc::new(AtomicBool::new(false));

        let search = {
            let release_rx = Arc::clone(&release_rx);
            let finished = Arc::clone(&finished);
            move |term: &str| {
                if term == "blocked" {
                    let _ = release_rx.lock().unwrap().recv();
                    finished.store(true, Ordering::SeqCst);
                    return bitmap(&[1]);
                }
                RoaringBitmap::new()
            }
        };

        // "missing" is queued first, so it runs even on a single-thread pool
        let result = gather_term_results(&terms(&["missing", "blocked"]), search);
        assert!(result.is_empty());
        assert!(!finished.load(Ordering::SeqCst));

        release_tx.send(()).unwrap();
    }

    #[test]
    fn test_gather_waits_for_every_term() {
        let search = |term: &str| match term {
            "a" => bitmap(&[1, 3, 5]),
            "b" => bitmap(&[3, 5, 7]),
            _ => bitmap(&[0, 3, 5, 9]),
        };
        let result = gather_term_results(&terms(&["a", "b", "c"]), search);
        assert_eq!(result, bitmap(&[3, 5]));
    }

    #[test]
    fn test_intersect() {
        assert!(intersect(Vec::new()).is_empty());
        assert_eq!(intersect(vec![bitmap(&[1, 2])]), bitmap(&[1, 2]));
        assert_eq!(
            intersect(vec![bitmap(&[1, 3, 5]), bitmap(&[3, 5, 7]), bitmap(&[5])]),
            bitmap(&[5])
        );
    }
}
