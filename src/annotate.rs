//! Extraction of note references from document text.
//!
//! Two inline syntaxes attach links to headings:
//!
//! - `+[[Target]]` / `+[[Target|Display]]` anywhere on the heading line is a
//!   cross-reference, shown alongside the heading.
//! - `-- [[Target]]` / `-- [[Target|Display]]` is a quick-link, shown as a
//!   child entry. It may sit inside the heading text, or fill whole lines
//!   directly below the heading.
//!
//! Matched syntax is removed from the heading label.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::{Heading, NoteReference};

static CROSS_REF_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+\[\[([^\]|]+)(?:\|([^\]]*))?\]\]").unwrap());

static QUICK_LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--\s*\[\[([^\]|]+)(?:\|([^\]]*))?\]\]").unwrap());

static QUICK_LINK_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*--\s*\[\[([^\]|]+)(?:\|([^\]]*))?\]\]\s*$").unwrap());

/// Annotations found for a single heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingAnnotations {
    /// Heading text with annotation syntax removed, trimmed
    pub text: String,

    /// Cross-references, left to right
    pub cross_refs: Vec<NoteReference>,

    /// Inline quick-links first, then line-following ones
    pub quick_links: Vec<NoteReference>,
}

/// Extract annotations for every heading of a document.
///
/// The result has one entry per heading, in the same order. Headings are
/// expected in document order; the quick-link scan for a heading stops at
/// the line of the heading that follows it.
pub fn extract_annotations(text: &str, headings: &[Heading]) -> Vec<HeadingAnnotations> {
    let lines: Vec<&str> = text.lines().collect();

    let annotations: Vec<HeadingAnnotations> = headings
        .iter()
        .enumerate()
        .map(|(index, heading)| {
            let source_line = lines
                .get(heading.line)
                .copied()
                .unwrap_or(heading.text.as_str());
            let cross_refs = cross_references(source_line);

            let mut quick_links = inline_quick_links(&heading.text);
            let end = headings
                .get(index + 1)
                .map_or(lines.len(), |next| next.line.min(lines.len()));
            quick_links.extend(following_quick_links(&lines, heading.line + 1, end));

            HeadingAnnotations {
                text: strip_annotations(&heading.text),
                cross_refs,
                quick_links,
            }
        })
        .collect();

    log::debug!(
        "Extracted annotations for {} headings over {} lines",
        annotations.len(),
        lines.len()
    );
    annotations
}

/// Collect every `+[[...]]` reference in a line.
pub fn cross_references(line: &str) -> Vec<NoteReference> {
    CROSS_REF_REGEX
        .captures_iter(line)
        .filter_map(|caps| reference(&caps))
        .collect()
}

/// Collect every `-- [[...]]` reference in a heading's text.
pub fn inline_quick_links(text: &str) -> Vec<NoteReference> {
    QUICK_LINK_REGEX
        .captures_iter(text)
        .filter_map(|caps| reference(&caps))
        .collect()
}

/// Parse a line consisting of nothing but a quick-link.
pub fn standalone_quick_link(line: &str) -> Option<NoteReference> {
    QUICK_LINK_LINE_REGEX
        .captures(line)
        .and_then(|caps| reference(&caps))
}

/// Scan the quick-link run in `lines[start..end]`.
///
/// Blank lines are skipped; the first other line that is not a quick-link
/// ends the run.
fn following_quick_links(lines: &[&str], start: usize, end: usize) -> Vec<NoteReference> {
    let mut links = Vec::new();
    for line in lines.iter().take(end).skip(start) {
        if line.trim().is_empty() {
            continue;
        }
        match standalone_quick_link(line) {
            Some(link) => links.push(link),
            None => break,
        }
    }
    links
}

/// Remove annotation syntax from a heading label.
///
/// Syntax with a blank target is not a reference and stays in the label.
pub fn strip_annotations(text: &str) -> String {
    let without_refs = CROSS_REF_REGEX.replace_all(text, strip_match);
    let without_links = QUICK_LINK_REGEX.replace_all(&without_refs, strip_match);
    without_links.trim().to_string()
}

fn strip_match(caps: &Captures<'_>) -> String {
    match reference(caps) {
        Some(_) => String::new(),
        None => caps[0].to_string(),
    }
}

fn reference(caps: &Captures<'_>) -> Option<NoteReference> {
    let target = caps.get(1).map_or("", |m| m.as_str()).trim();
    if target.is_empty() {
        return None;
    }
    let target = target.to_string();
    let display = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Some(NoteReference { target, display })
}
