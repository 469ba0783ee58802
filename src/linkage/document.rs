//! Markdown documents as annotation blocks.
//!
//! A document is held as its raw lines (terminators included) so untouched
//! lines render back byte-for-byte. A single forward pass finds every
//! annotation line together with the link line generated for it on an
//! earlier run, if any.

use std::sync::OnceLock;

use regex::Regex;

use super::lines::lines_containing;

/// Marker every generated permalink carries.
pub const LINK_MARKER: &str = "/blob/";

/// Substring every annotation line carries; used to pre-filter lines.
const ANNOTATION_HINT: &str = "]: <";

fn annotation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]: <(.+?) - (.+)>").expect("annotation regex"))
}

/// A source reference written as `[label]: <path - search term>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Footnote label between the brackets.
    pub label: String,
    /// Path relative to the reference repository root.
    pub file_path: String,
    /// Literal text to find inside `file_path`.
    pub search_term: String,
}

impl Annotation {
    /// Parses an annotation out of a single line, if the line holds one.
    ///
    /// The path ends at the first ` - ` and the search term runs to the last
    /// `>`, so a term may itself contain ` - ` but a path may not.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = annotation_regex().captures(line)?;
        Some(Self {
            label: caps[1].to_string(),
            file_path: caps[2].to_string(),
            search_term: caps[3].to_string(),
        })
    }
}

/// An annotation and where its permalink lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationBlock {
    /// The parsed annotation.
    pub annotation: Annotation,
    /// 0-based index of the annotation line.
    pub annotation_line: usize,
    /// 0-based index of a previously generated link line directly above, if any.
    pub link_line: Option<usize>,
}

impl AnnotationBlock {
    /// Returns `true` if applying a link replaces an existing line.
    #[must_use]
    pub fn replaces_existing(&self) -> bool {
        self.link_line.is_some()
    }
}

/// A markdown document split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Splits `text` into lines, keeping each line's terminator.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    /// Number of lines in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` for an empty document.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The text of line `index` without its terminator.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|l| strip_terminator(l))
    }

    /// Finds every annotation block, in document order.
    #[must_use]
    pub fn blocks(&self) -> Vec<AnnotationBlock> {
        let text = self.render();
        lines_containing(&text, ANNOTATION_HINT)
            .into_iter()
            .filter_map(|m| {
                let annotation = Annotation::parse(&m.line)?;
                let annotation_line = m.number - 1;
                let link_line = annotation_line
                    .checked_sub(1)
                    .filter(|&above| self.is_link_line(above));
                Some(AnnotationBlock {
                    annotation,
                    annotation_line,
                    link_line,
                })
            })
            .collect()
    }

    fn is_link_line(&self, index: usize) -> bool {
        self.line(index)
            .is_some_and(|line| line.contains(LINK_MARKER) && Annotation::parse(line).is_none())
    }

    /// Places `link` for each block: replaces the existing link line or
    /// inserts a new one directly above the annotation.
    ///
    /// Blocks must come from [`Document::blocks`] on this document.
    pub fn apply(&mut self, mut edits: Vec<(AnnotationBlock, String)>) {
        let newline = self.newline().to_string();
        // Bottom-up so insertions never shift a pending edit.
        edits.sort_by_key(|(block, _)| std::cmp::Reverse(block.annotation_line));
        for (block, link) in edits {
            match block.link_line {
                Some(index) => {
                    let ending = terminator(&self.lines[index]).to_string();
                    self.lines[index] = link + &ending;
                }
                None => self.lines.insert(block.annotation_line, link + &newline),
            }
        }
    }

    /// Joins the lines back into text.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.concat()
    }

    /// The document's line terminator, judged by its first terminated line.
    fn newline(&self) -> &'static str {
        let first = self.lines.iter().find(|l| l.ends_with('\n'));
        if first.is_some_and(|l| l.ends_with("\r\n")) {
            "\r\n"
        } else {
            "\n"
        }
    }
}

fn terminator(line: &str) -> &str {
    &line[strip_terminator(line).len()..]
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}
