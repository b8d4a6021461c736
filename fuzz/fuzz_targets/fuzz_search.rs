#![no_main]

use arbitrary::Arbitrary;
use folio::index::FlatLayout;
use folio::query::SearchMode;
use folio::Searcher;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    corpus: &'a str,
    query: &'a str,
    phrase: bool,
}

fuzz_target!(|input: Input<'_>| {
    let Ok(searcher) = Searcher::from_text(input.corpus, &FlatLayout) else {
        return;
    };
    let mode = if input.phrase {
        SearchMode::Phrase
    } else {
        SearchMode::AllWords
    };
    for result in searcher.search(input.query, mode) {
        assert!(result.lines.len() >= 2);
    }
});
