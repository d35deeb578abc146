//! In-memory documents.

use std::collections::HashMap;

use crate::model::Heading;

use super::{scan_headings, ContentSource, StructureSource};

/// A set of documents held in memory, keyed by path.
///
/// Headings are scanned from the stored Markdown on request.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, builder style.
    pub fn with_document(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Insert or replace a document.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }

    /// Remove a document.
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.documents.remove(path)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl ContentSource for MemorySource {
    fn content(&self, path: &str) -> Option<String> {
        self.documents.get(path).cloned()
    }
}

impl StructureSource for MemorySource {
    fn headings(&self, path: &str) -> Option<Vec<Heading>> {
        self.documents.get(path).map(|text| scan_headings(text))
    }
}
