//! Doc string recovery from raw feature text.
//!
//! The `gherkin` crate exposes only the doc string content. The delimiter and
//! media type are recovered by scanning the source text that follows the
//! owning step, and the content lines are re-read with the delimiter's
//! indentation removed so the literal block survives unchanged.

use super::{FeatureSource, LineContent};
use crate::ast::DocString;

const QUOTES: &str = "\"\"\"";
const BACKTICKS: &str = "```";

/// A doc string block located in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct DocStringBlock {
    delimiter: &'static str,
    media_type: Option<String>,
    lines: Vec<String>,
}

impl DocStringBlock {
    pub(super) fn into_doc_string(self) -> DocString {
        DocString {
            content: self.lines.join("\n"),
            delimiter: self.delimiter.to_string(),
            media_type: self.media_type,
        }
    }
}

struct OpenBlock {
    delimiter: &'static str,
    indent: usize,
    media_type: Option<String>,
    lines: Vec<String>,
}

/// Find the first doc string block starting on a line after `start_from`.
pub(super) fn find_doc_string(
    source: FeatureSource<'_>,
    start_from: usize,
) -> Option<DocStringBlock> {
    let mut cursor = start_from.min(source.len());
    // Start scanning from the next line boundary.
    if let Some(next_newline) = source
        .get(cursor..source.len())
        .and_then(|tail| tail.find('\n'))
    {
        cursor = cursor.saturating_add(next_newline).saturating_add(1);
    }

    let mut open: Option<OpenBlock> = None;
    while cursor < source.len() {
        let tail = source.get(cursor..source.len())?;
        let line_end = tail
            .find('\n')
            .map_or(source.len(), |idx| cursor.saturating_add(idx));
        let raw = source.get(cursor..line_end)?;
        let line = LineContent::new(raw.strip_suffix('\r').unwrap_or(raw));

        if open
            .as_ref()
            .is_some_and(|block| is_closing(line, block.delimiter))
        {
            let block = open.take()?;
            return Some(DocStringBlock {
                delimiter: block.delimiter,
                media_type: block.media_type,
                lines: block.lines,
            });
        }
        match open.as_mut() {
            Some(block) => block
                .lines
                .push(unescape(strip_indent(line.as_str(), block.indent), block.delimiter)),
            None => open = open_block(line),
        }

        cursor = line_end.saturating_add(1);
    }
    None
}

fn open_block(line: LineContent<'_>) -> Option<OpenBlock> {
    let trimmed = line.trim_start();
    let delimiter = parse_delimiter(trimmed)?;
    let media_type = trimmed
        .strip_prefix(delimiter)
        .map(str::trim)
        .filter(|rest| !rest.is_empty())
        .map(ToString::to_string);
    Some(OpenBlock {
        delimiter,
        indent: line.as_str().len().saturating_sub(trimmed.len()),
        media_type,
        lines: Vec::new(),
    })
}

fn parse_delimiter(trimmed: &str) -> Option<&'static str> {
    if trimmed.starts_with(QUOTES) {
        return Some(QUOTES);
    }
    if trimmed.starts_with(BACKTICKS) {
        return Some(BACKTICKS);
    }
    None
}

fn is_closing(line: LineContent<'_>, delimiter: &str) -> bool {
    line.trim_start()
        .strip_prefix(delimiter)
        .is_some_and(|rest| rest.trim().is_empty())
}

/// Remove up to `indent` leading blanks, keeping any deeper indentation.
fn strip_indent(line: &str, indent: usize) -> &str {
    let mut rest = line;
    for _ in 0..indent {
        match rest.strip_prefix(|c: char| c == ' ' || c == '\t') {
            Some(stripped) => rest = stripped,
            None => break,
        }
    }
    rest
}

fn unescape(line: &str, delimiter: &str) -> String {
    let escaped: String = delimiter.chars().flat_map(|c| ['\\', c]).collect();
    line.replace(&escaped, delimiter)
}

/// Remove the indentation common to all non-blank lines.
///
/// Used when the doc string block cannot be located in the source and only
/// the parser's content is available.
pub(super) fn dedent(content: &str) -> String {
    let indent = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len().saturating_sub(line.trim_start().len()))
        .min()
        .unwrap_or(0);
    content
        .lines()
        .map(|line| strip_indent(line, indent))
        .collect::<Vec<_>>()
        .join("\n")
}
