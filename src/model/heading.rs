//! Heading and reference types.

use serde::{Deserialize, Serialize};

/// A heading as reported by a document structure source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: u8,

    /// Heading text without markup
    pub text: String,

    /// Source line of the heading (0-indexed)
    pub line: usize,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: u8, text: impl Into<String>, line: usize) -> Self {
        Self {
            level,
            text: text.into(),
            line,
        }
    }
}

/// A link to another note, attached to a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteReference {
    /// Path of the referenced note
    pub target: String,

    /// Optional display text; the target is shown when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl NoteReference {
    /// Create a reference without display text.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            display: None,
        }
    }

    /// Create a reference with display text.
    pub fn with_display(target: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            display: Some(display.into()),
        }
    }

    /// Text to show for this reference.
    pub fn label(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.target)
    }
}

/// A heading together with the annotations found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedHeading {
    /// Heading level (1-6)
    pub level: u8,

    /// Display text, stripped of annotation syntax
    pub text: String,

    /// Source line of the heading (0-indexed)
    pub line: usize,

    /// Cross-references written as `+[[Target]]`
    #[serde(default)]
    pub cross_refs: Vec<NoteReference>,

    /// Quick-links written as `-- [[Target]]`
    #[serde(default)]
    pub quick_links: Vec<NoteReference>,
}

impl AnnotatedHeading {
    /// Wrap a heading with no annotations.
    pub fn plain(heading: &Heading) -> Self {
        Self {
            level: heading.level,
            text: heading.text.trim().to_string(),
            line: heading.line,
            cross_refs: Vec::new(),
            quick_links: Vec::new(),
        }
    }

    /// Check if the heading carries any reference.
    pub fn has_references(&self) -> bool {
        !self.cross_refs.is_empty() || !self.quick_links.is_empty()
    }
}
