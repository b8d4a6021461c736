//! Work segmentation
//!
//! Splits the raw corpus into titled sub-documents. How titles are found is a
//! property of the corpus, not of search, so it sits behind [`CorpusLayout`].

use super::types::{IndexError, TextOffset, Work};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Knows where the titled works of a particular corpus begin and end
pub trait CorpusLayout: Send + Sync {
    /// Segment the prepared raw corpus into works
    fn segment_works(&self, raw: &str) -> Result<WorkIndex, IndexError>;
}

/// Layout with a table-of-contents block ahead of the body.
///
/// The block ends at the first run of `separator_newlines` newlines. Titles
/// are listed after `marker`, one per blank-line-separated entry; each work in
/// the body starts at its title followed by a blank line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOfContentsLayout {
    pub marker: String,
    pub separator_newlines: usize,
}

impl Default for TableOfContentsLayout {
    fn default() -> Self {
        Self {
            marker: "Contents".to_string(),
            separator_newlines: 6,
        }
    }
}

impl CorpusLayout for TableOfContentsLayout {
    fn segment_works(&self, raw: &str) -> Result<WorkIndex, IndexError> {
        let separator = "\n".repeat(self.separator_newlines);
        let (toc, body) = raw
            .split_once(&separator)
            .ok_or(IndexError::MissingSeparator(self.separator_newlines))?;

        let titles = parse_titles(toc, &self.marker)?;
        if titles.is_empty() {
            tracing::warn!(marker = %self.marker, "table of contents lists no titles");
        }

        let works = locate_works(body, &titles, toc.len() + separator.len())?;
        Ok(WorkIndex { works })
    }
}

/// Layout for corpora without titled works; every lookup yields no title
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatLayout;

impl CorpusLayout for FlatLayout {
    fn segment_works(&self, _raw: &str) -> Result<WorkIndex, IndexError> {
        Ok(WorkIndex::default())
    }
}

/// Titles listed after `marker`, in order
pub fn parse_titles(toc: &str, marker: &str) -> Result<Vec<String>, IndexError> {
    let (_, listing) = toc
        .split_once(marker)
        .ok_or_else(|| IndexError::MissingContentsMarker(marker.to_string()))?;

    Ok(listing
        .trim()
        .split("\n\n")
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(String::from)
        .collect())
}

/// Find every title heading in `body`; offsets are shifted by `shift`
fn locate_works(body: &str, titles: &[String], shift: usize) -> Result<Vec<Work>, IndexError> {
    if titles.is_empty() {
        return Ok(Vec::new());
    }

    let alternation = titles
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let heading = Regex::new(&format!(r"(?P<title>{alternation})[\n\r]{{2,}}"))?;

    let starts: Vec<(usize, &str)> = heading
        .captures_iter(body)
        .filter_map(|caps| caps.name("title"))
        .map(|m| (m.start(), m.as_str()))
        .collect();

    let works = starts
        .iter()
        .enumerate()
        .map(|(i, &(start, title))| {
            let end = starts.get(i + 1).map_or(body.len(), |&(next, _)| next);
            Work {
                title: title.to_string(),
                from: start + shift,
                to: end + shift,
            }
        })
        .collect();

    Ok(works)
}

/// Ordered works of the corpus body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkIndex {
    works: Vec<Work>,
}

impl WorkIndex {
    pub fn new(works: Vec<Work>) -> Self {
        Self { works }
    }

    /// The work containing `offset`.
    ///
    /// Fails for offsets outside every work, e.g. inside the table of
    /// contents. Where two works meet, the offset belongs to the later one.
    pub fn find_work_by_offset(&self, offset: TextOffset) -> Result<&Work, IndexError> {
        let idx = self.works.partition_point(|w| w.from <= offset);
        idx.checked_sub(1)
            .map(|i| &self.works[i])
            .filter(|w| w.includes(offset))
            .ok_or(IndexError::WorkNotFound(offset))
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Work> {
        self.works.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "THE COLLECTED PLAYS\n\nContents\n\nTHE TEMPEST\n\nTWELFTH NIGHT; OR, WHAT YOU WILL\n\n\n\n\n\nTHE TEMPEST\n\nACT I. On a ship at sea.\n\nBoatswain! Here, master.\n\nTWELFTH NIGHT; OR, WHAT YOU WILL\n\nIf music be the food of love, play on.";

    #[test]
    fn test_parse_titles() {
        let titles = parse_titles("Intro\n\nContents\n\n  A \n\nB\n\n\n\nC\n", "Contents").unwrap();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_titles_missing_marker() {
        let err = parse_titles("no listing here", "Contents").unwrap_err();
        assert!(matches!(err, IndexError::MissingContentsMarker(m) if m == "Contents"));
    }

    #[test]
    fn test_segment_works() {
        let works = TableOfContentsLayout::default().segment_works(CORPUS).unwrap();
        let got: Vec<_> = works.iter().cloned().collect();

        assert_eq!(
            got,
            vec![
                Work {
                    title: "THE TEMPEST".to_string(),
                    from: 82,
                    to: 147,
                },
                Work {
                    title: "TWELFTH NIGHT; OR, WHAT YOU WILL".to_string(),
                    from: 147,
                    to: 219,
                },
            ]
        );
        assert!(CORPUS[82..].starts_with("THE TEMPEST\n\nACT I."));
    }

    #[test]
    fn test_find_work_by_offset() {
        let works = TableOfContentsLayout::default().segment_works(CORPUS).unwrap();

        assert_eq!(works.find_work_by_offset(82).unwrap().title, "THE TEMPEST");
        assert_eq!(works.find_work_by_offset(120).unwrap().title, "THE TEMPEST");
        assert_eq!(
            works.find_work_by_offset(147).unwrap().title,
            "TWELFTH NIGHT; OR, WHAT YOU WILL"
        );
        assert_eq!(
            works.find_work_by_offset(219).unwrap().title,
            "TWELFTH NIGHT; OR, WHAT YOU WILL"
        );
    }

    #[test]
    fn test_offsets_outside_works() {
        let works = TableOfContentsLayout::default().segment_works(CORPUS).unwrap();

        // inside the table of contents
        assert!(matches!(works.find_work_by_offset(40), Err(IndexError::WorkNotFound(40))));
        assert!(works.find_work_by_offset(81).is_err());
        assert!(works.find_work_by_offset(220).is_err());
    }

    #[test]
    fn test_missing_separator() {
        let err = TableOfContentsLayout::default()
            .segment_works("Contents\n\nA\n\nA\n\nbody")
            .unwrap_err();
        assert!(matches!(err, IndexError::MissingSeparator(6)));
    }

    #[test]
    fn test_missing_marker() {
        let err = TableOfContentsLayout::default()
            .segment_works("Index\n\nA\n\n\n\n\n\nA\n\nbody")
            .unwrap_err();
        assert!(matches!(err, IndexError::MissingContentsMarker(_)));
    }

    #[test]
    fn test_titles_are_matched_literally() {
        let raw = "Contents\n\nA.B\n\n\n\n\n\nAxB\n\nnot a work\n\nA.B\n\nthe work";
        let works = TableOfContentsLayout::default().segment_works(raw).unwrap();
        assert_eq!(works.len(), 1);
        assert_eq!(works.iter().next().unwrap().title, "A.B");
    }

    #[test]
    fn test_title_needs_blank_line() {
        let raw = "Contents\n\nHAMLET\n\n\n\n\n\nHAMLET\n\nEnter HAMLET\nHAMLET speaks";
        let works = TableOfContentsLayout::default().segment_works(raw).unwrap();
        assert_eq!(works.len(), 1);
    }

    #[test]
    fn test_flat_layout() {
        let works = FlatLayout.segment_works(CORPUS).unwrap();
        assert!(works.is_empty());
        assert!(works.find_work_by_offset(0).is_err());
    }
}
