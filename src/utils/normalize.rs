//! Query and corpus normalization
//!
//! Both the corpus and every query go through [`normalize`], so matching is
//! insensitive to case and to a small set of punctuation marks.

/// Characters removed before matching
pub const STRIPPED_CHARS: [char; 6] = ['\'', ',', ';', '.', '-', ':'];

#[inline]
pub fn is_stripped(ch: char) -> bool {
    STRIPPED_CHARS.contains(&ch)
}

/// Strip punctuation and lowercase `text`
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    normalize_into(text, &mut out);
    out
}

/// Append the normalized form of `text` to `out`.
///
/// Works one character at a time, so normalizing consecutive pieces of a text
/// and concatenating them yields the same bytes as normalizing the whole.
pub fn normalize_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        if is_stripped(ch) {
            continue;
        }
        if ch.is_ascii() {
            out.push(ch.to_ascii_lowercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
}
