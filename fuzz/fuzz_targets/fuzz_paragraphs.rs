#![no_main]

use folio::index::ParagraphIndex;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let raw = ParagraphIndex::build(data);
    let (normalized, search) = raw.normalize_text(data);

    // Both segmentations must describe the same paragraphs
    assert_eq!(raw.len(), search.len());
    assert_eq!(search.text_len(), normalized.len());

    // Every offset maps to some paragraph
    for offset in 0..data.len() {
        assert!(raw.paragraph_for_offset(offset).is_ok());
    }
});
