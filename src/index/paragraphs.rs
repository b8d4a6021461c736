//! Paragraph segmentation
//!
//! A paragraph ends at every run of two or more `\n`/`\r` bytes. Paragraphs
//! are numbered in text order starting at zero.

use super::types::{IndexError, Paragraph, ParagraphId, TextOffset};
use crate::utils::normalize_into;
use memchr::memchr2;

/// Ordered, non-overlapping paragraphs of a single text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphIndex {
    paragraphs: Vec<Paragraph>,
    /// Length of the text this index was built against
    text_len: usize,
}

impl ParagraphIndex {
    /// Segment `text` into paragraphs.
    ///
    /// The final paragraph always extends to the end of the text, so even an
    /// empty text yields one (empty) paragraph.
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut paragraphs = Vec::new();
        let mut start = 0;
        let mut pos = 0;

        while let Some(found) = memchr2(b'\n', b'\r', &bytes[pos..]) {
            let run_start = pos + found;
            let run_end = bytes[run_start..]
                .iter()
                .position(|&b| b != b'\n' && b != b'\r')
                .map_or(bytes.len(), |len| run_start + len);

            if run_end - run_start >= 2 {
                paragraphs.push(Paragraph {
                    id: paragraphs.len() as ParagraphId,
                    from: start,
                    to: run_start,
                });
                start = run_end;
            }
            pos = run_end;
        }

        paragraphs.push(Paragraph {
            id: paragraphs.len() as ParagraphId,
            from: start,
            to: bytes.len(),
        });

        Self {
            paragraphs,
            text_len: bytes.len(),
        }
    }

    /// Normalize `text` along this segmentation.
    ///
    /// `text` must be the text this index was built from. Each paragraph and
    /// each separator is normalized on its own, so the returned index has the
    /// same ids in the same order, expressed in offsets of the returned text.
    pub fn normalize_text(&self, text: &str) -> (String, ParagraphIndex) {
        debug_assert_eq!(text.len(), self.text_len);

        let mut out = String::with_capacity(text.len());
        let mut paragraphs = Vec::with_capacity(self.paragraphs.len());
        let mut cursor = 0;

        for p in &self.paragraphs {
            normalize_into(&text[cursor..p.from], &mut out);
            let from = out.len();
            normalize_into(&text[p.from..p.to], &mut out);
            paragraphs.push(Paragraph {
                id: p.id,
                from,
                to: out.len(),
            });
            cursor = p.to;
        }
        normalize_into(&text[cursor..], &mut out);

        let text_len = out.len();
        (out, ParagraphIndex { paragraphs, text_len })
    }

    /// Id of the paragraph covering `offset`.
    ///
    /// A paragraph covers its own text and the separator that follows it, so
    /// every offset below the text length maps to exactly one paragraph.
    pub fn paragraph_for_offset(&self, offset: TextOffset) -> Result<ParagraphId, IndexError> {
        if offset >= self.text_len {
            return Err(IndexError::OffsetNotCovered(offset));
        }

        let idx = self.paragraphs.partition_point(|p| p.from <= offset);
        idx.checked_sub(1)
            .map(|i| self.paragraphs[i].id)
            .ok_or(IndexError::OffsetNotCovered(offset))
    }

    pub fn get(&self, id: ParagraphId) -> Result<&Paragraph, IndexError> {
        self.paragraphs
            .get(id as usize)
            .ok_or(IndexError::ParagraphNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }

    pub fn iter(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter()
    }
}
