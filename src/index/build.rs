use crate::index::corpus::read_corpus;
use crate::index::paragraphs::ParagraphIndex;
use crate::index::reader::CorpusIndex;
use crate::index::suffix_array::{SuffixArrayBuilder, SuffixArrayConfig};
use crate::index::types::IndexError;
use crate::index::works::CorpusLayout;
use crate::utils::progress::{ProgressBar, ProgressStyle};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};

/// Read the corpus at `path` and build every index over it
pub fn load_corpus_index(path: &Path, layout: &dyn CorpusLayout, silent: bool) -> Result<CorpusIndex> {
    let raw = read_corpus(path)?;
    tracing::info!(path = %path.display(), bytes = raw.len(), "corpus loaded");

    build_corpus_index_with_progress(raw, layout, &SuffixArrayConfig::default(), silent)
        .with_context(|| format!("Failed to index corpus {}", path.display()))
}

/// Build every index over an already prepared corpus
pub fn build_corpus_index(raw: String, layout: &dyn CorpusLayout) -> Result<CorpusIndex, IndexError> {
    build_corpus_index_with_progress(raw, layout, &SuffixArrayConfig::default(), true)
}

/// Build every index, optionally showing a spinner while the suffix array sorts
pub fn build_corpus_index_with_progress(
    raw: String,
    layout: &dyn CorpusLayout,
    sa_config: &SuffixArrayConfig,
    silent: bool,
) -> Result<CorpusIndex, IndexError> {
    let start = Instant::now();
    let spinner = (!silent).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    });
    let step = |msg: &'static str| {
        if let Some(ref s) = spinner {
            s.set_message(msg);
        }
    };

    // Layout problems are fatal; check them before the expensive work
    step("Segmenting works...");
    let works = layout.segment_works(&raw)?;

    step("Segmenting paragraphs...");
    let result_paragraphs = ParagraphIndex::build(&raw);

    step("Normalizing corpus...");
    let (normalized, search_paragraphs) = result_paragraphs.normalize_text(&raw);

    step("Sorting suffixes...");
    let suffixes = SuffixArrayBuilder::new(sa_config.clone()).build(normalized.into_bytes())?;

    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    tracing::info!(
        works = works.len(),
        paragraphs = result_paragraphs.len(),
        suffixes = suffixes.stats().suffix_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "corpus indexed"
    );

    Ok(CorpusIndex::new(
        raw,
        suffixes,
        search_paragraphs,
        result_paragraphs,
        works,
    ))
}
