use crate::index::reader::CorpusIndex;
use serde::Serialize;

/// Size summary of a loaded corpus
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub raw_bytes: usize,
    pub normalized_bytes: usize,
    pub paragraphs: usize,
    pub suffixes: usize,
    pub works: Vec<WorkStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkStats {
    pub title: String,
    pub bytes: usize,
    pub paragraphs: usize,
}

/// Collect statistics for a corpus index
pub fn corpus_stats(index: &CorpusIndex) -> CorpusStats {
    let paragraphs = index.result_paragraphs();

    let works = index
        .works()
        .iter()
        .map(|work| WorkStats {
            title: work.title.clone(),
            bytes: work.to - work.from,
            paragraphs: paragraphs
                .iter()
                .filter(|p| p.from >= work.from && p.from < work.to)
                .count(),
        })
        .collect();

    CorpusStats {
        raw_bytes: index.raw_text().len(),
        normalized_bytes: index.normalized_text().len(),
        paragraphs: paragraphs.len(),
        suffixes: index.suffixes().stats().suffix_count,
        works,
    }
}

/// Display corpus statistics
pub fn show_stats(index: &CorpusIndex) {
    let stats = corpus_stats(index);

    println!("Corpus Statistics");
    println!("=================");
    println!();
    println!("Raw size:         {}", format_size(stats.raw_bytes as u64));
    println!("Normalized size:  {}", format_size(stats.normalized_bytes as u64));
    println!("Paragraphs:       {}", stats.paragraphs);
    println!("Suffixes:         {}", stats.suffixes);
    println!("Works:            {}", stats.works.len());

    if !stats.works.is_empty() {
        println!();
        println!("Works by size:");
        let mut sorted = stats.works.clone();
        sorted.sort_by(|a, b| b.bytes.cmp(&a.bytes));

        for work in sorted.iter().take(15) {
            println!(
                "  {:40} {:>10} {:>6} paragraphs",
                work.title,
                format_size(work.bytes as u64),
                work.paragraphs
            );
        }

        if sorted.len() > 15 {
            println!("  ... and {} more", sorted.len() - 15);
        }
    }
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
