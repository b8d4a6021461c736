//! Corpus loading
//!
//! The corpus is read once at start-up and cleaned up before any indexing:
//! line endings become `\n`, surrounding whitespace is trimmed and a common
//! mis-decoded apostrophe is repaired.

use anyhow::{Context, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// UTF-8 right single quote decoded as Windows-1252 and re-encoded
const MISDECODED_APOSTROPHE: &str = "\u{e2}\u{20ac}\u{2122}";

/// Read and prepare the corpus at `path`
pub fn read_corpus(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat corpus {}", path.display()))?
        .len();
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the file is only read, and the mapping is dropped before returning
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map corpus {}", path.display()))?;
    let text = std::str::from_utf8(&mmap)
        .with_context(|| format!("Corpus {} is not valid UTF-8", path.display()))?;

    Ok(prepare_corpus(text))
}

/// Normalize line endings, repair apostrophes and trim the whole text
pub fn prepare_corpus(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(MISDECODED_APOSTROPHE, "'")
        .trim()
        .to_string()
}
