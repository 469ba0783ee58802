//! Line search helpers over raw file text.

use regex::Regex;

/// A line that matched a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    /// 1-based line number.
    pub number: usize,
    /// The full text of the line, without its terminator.
    pub line: String,
    /// The text that matched within the line.
    pub matched: String,
}

/// Returns the first line containing `term` literally.
///
/// The term is compiled as an escaped regex so punctuation such as `(`, `.`
/// or `*` inside a code snippet matches itself. Lines are split on `\n` with
/// an optional preceding `\r`.
#[must_use]
pub fn find_line(text: &str, term: &str) -> Option<LineMatch> {
    let re = Regex::new(&regex::escape(term)).ok()?;
    text.lines().enumerate().find_map(|(i, line)| {
        re.find(line).map(|m| LineMatch {
            number: i + 1,
            line: line.to_string(),
            matched: m.as_str().to_string(),
        })
    })
}

/// Returns every line containing `needle` as a plain substring, in order.
#[must_use]
pub fn lines_containing(text: &str, needle: &str) -> Vec<LineMatch> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| line.contains(needle))
        .map(|(i, line)| LineMatch {
            number: i + 1,
            line: line.to_string(),
            matched: needle.to_string(),
        })
        .collect()
}
