//! Terminal output for search results

use crate::index::types::SearchResult;
use regex::{Regex, RegexBuilder};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print results grouped under their work titles, highlighting `terms`
pub fn print_results(results: &[SearchResult], terms: &[String], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    let highlight = highlight_pattern(terms);

    write_results(&mut stdout, results, highlight.as_ref())
}

/// Print results as a JSON array, the same shape the HTTP interface returns
pub fn print_json(results: &[SearchResult]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, results)?;
    writeln!(out)
}

pub fn write_results<W: WriteColor>(
    out: &mut W,
    results: &[SearchResult],
    highlight: Option<&Regex>,
) -> io::Result<()> {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        if result.work.is_empty() {
            writeln!(out, "(untitled)")?;
        } else {
            writeln!(out, "{}", result.work)?;
        }
        out.reset()?;

        for line in &result.lines {
            write_line(out, line, highlight)?;
        }
    }

    Ok(())
}

/// Print one line with every term occurrence highlighted
fn write_line<W: WriteColor>(out: &mut W, line: &str, highlight: Option<&Regex>) -> io::Result<()> {
    let Some(pattern) = highlight else {
        return writeln!(out, "{}", line);
    };

    let mut last = 0;
    for m in pattern.find_iter(line) {
        write!(out, "{}", &line[last..m.start()])?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", m.as_str())?;
        out.reset()?;
        last = m.end();
    }
    writeln!(out, "{}", &line[last..])
}

/// Case-insensitive pattern matching any of `terms`
pub fn highlight_pattern(terms: &[String]) -> Option<Regex> {
    if terms.is_empty() {
        return None;
    }
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .ok()
}
