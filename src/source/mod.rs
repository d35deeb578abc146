//! Document collaborators: where headings and text come from.
//!
//! The core never reads documents itself. A [`StructureSource`] supplies the
//! headings of a document and a [`ContentSource`] its full text; both may
//! come up empty, which the pipeline treats as "no headings" and "no
//! annotations" respectively.

mod fs;
mod markdown;
mod memory;

pub use fs::FsSource;
#[cfg(feature = "async")]
pub use fs::read_content_async;
pub use markdown::{find_nav_blocks, scan_headings, MarkdownScanner, NavBlock, NAV_BLOCK_LANGUAGE};
pub use memory::MemorySource;

use crate::model::Heading;

/// Supplies the heading structure of a document.
pub trait StructureSource {
    /// Headings of the document at `path`, in document order.
    ///
    /// `None` when the document is unknown or has not been indexed yet.
    fn headings(&self, path: &str) -> Option<Vec<Heading>>;
}

/// Supplies the full text of a document.
pub trait ContentSource {
    /// Current text of the document at `path`, if it can be read.
    fn content(&self, path: &str) -> Option<String>;
}

impl<T: StructureSource + ?Sized> StructureSource for &T {
    fn headings(&self, path: &str) -> Option<Vec<Heading>> {
        (**self).headings(path)
    }
}

impl<T: ContentSource + ?Sized> ContentSource for &T {
    fn content(&self, path: &str) -> Option<String> {
        (**self).content(path)
    }
}
