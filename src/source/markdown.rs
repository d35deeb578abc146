//! Markdown heading scan over raw lines, using memchr to split them.
//!
//! Recognizes ATX headings (`#` to `######`) outside fenced code blocks,
//! and locates fenced `nav` blocks. Line numbers are 0-indexed.

use crate::model::Heading;

use super::{ContentSource, StructureSource};

/// Info string that marks a navigation block.
pub const NAV_BLOCK_LANGUAGE: &str = "nav";

/// A fenced `nav` block found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBlock {
    /// Line of the opening fence (0-indexed)
    pub line: usize,

    /// Raw body of the block (YAML)
    pub source: String,
}

/// Structure source that scans Markdown text from a content source.
pub struct MarkdownScanner<C> {
    content: C,
}

impl<C: ContentSource> MarkdownScanner<C> {
    /// Create a scanner over a content source.
    pub fn new(content: C) -> Self {
        Self { content }
    }

    /// Get the underlying content source.
    pub fn content(&self) -> &C {
        &self.content
    }
}

impl<C: ContentSource> StructureSource for MarkdownScanner<C> {
    fn headings(&self, path: &str) -> Option<Vec<Heading>> {
        self.content.content(path).map(|text| scan_headings(&text))
    }
}

/// Iterator over the lines of a text, without line terminators.
struct Lines<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.pos >= self.text.len() {
            return None;
        }
        let rest = &self.text.as_bytes()[self.pos..];
        let end = memchr::memchr(b'\n', rest).map_or(self.text.len(), |i| self.pos + i);
        let line = &self.text[self.pos..end];
        self.pos = end + 1;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}

/// An open code fence.
struct Fence {
    marker: u8,
    len: usize,
}

impl Fence {
    /// Try to open a fence; returns the fence and its info string.
    fn open(line: &str) -> Option<(Fence, &str)> {
        let body = strip_indent(line)?;
        let marker = *body.as_bytes().first()?;
        if marker != b'`' && marker != b'~' {
            return None;
        }
        let len = body.bytes().take_while(|&b| b == marker).count();
        if len < 3 {
            return None;
        }
        let info = body[len..].trim();
        if marker == b'`' && info.contains('`') {
            return None;
        }
        Some((Fence { marker, len }, info))
    }

    fn closes(&self, line: &str) -> bool {
        let Some(body) = strip_indent(line) else {
            return false;
        };
        let len = body.bytes().take_while(|&b| b == self.marker).count();
        len >= self.len && body[len..].trim().is_empty()
    }
}

/// Remove up to three spaces of indentation.
fn strip_indent(line: &str) -> Option<&str> {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return None;
    }
    Some(&line[indent..])
}

/// Parse an ATX heading line.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let body = strip_indent(line)?;
    let level = body.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &body[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((level as u8, strip_closing_sequence(rest.trim())))
}

/// Drop an optional closing `#` sequence.
fn strip_closing_sequence(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.is_empty() {
        return without;
    }
    if without.len() != text.len() && without.ends_with([' ', '\t']) {
        return without.trim_end();
    }
    text
}

/// Scan a Markdown document for headings, in document order.
pub fn scan_headings(text: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut fence: Option<Fence> = None;

    for (line_num, line) in Lines::new(text).enumerate() {
        if let Some(open) = &fence {
            if open.closes(line) {
                fence = None;
            }
            continue;
        }
        if let Some((opened, _)) = Fence::open(line) {
            fence = Some(opened);
            continue;
        }
        if let Some((level, heading)) = parse_heading(line) {
            headings.push(Heading::new(level, heading, line_num));
        }
    }

    log::debug!("Scanned {} headings", headings.len());
    headings
}

/// Locate every fenced `nav` block in a document.
///
/// An unclosed block runs to the end of the document.
pub fn find_nav_blocks(text: &str) -> Vec<NavBlock> {
    let mut blocks = Vec::new();
    let mut fence: Option<Fence> = None;
    let mut current: Option<(usize, Vec<&str>)> = None;

    for (line_num, line) in Lines::new(text).enumerate() {
        if let Some(open) = &fence {
            if open.closes(line) {
                fence = None;
                if let Some((start, body)) = current.take() {
                    blocks.push(NavBlock {
                        line: start,
                        source: body.join("\n"),
                    });
                }
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line);
            }
            continue;
        }
        if let Some((opened, info)) = Fence::open(line) {
            if info.split_whitespace().next() == Some(NAV_BLOCK_LANGUAGE) {
                current = Some((line_num, Vec::new()));
            }
            fence = Some(opened);
        }
    }

    if let Some((start, body)) = current {
        blocks.push(NavBlock {
            line: start,
            source: body.join("\n"),
        });
    }
    blocks
}
