//! # structured-nav
//!
//! Dynamic tables of contents derived from a document's headings.
//!
//! Given the headings of a document, optionally its text, and a display
//! configuration, this library builds a navigation outline: a nested tree
//! for list styles or a single line of top-level entries for the inline
//! style. Headings may carry links to other notes, written as
//! `+[[Note]]` on the heading line or as `-- [[Note]]` quick-links below it.
//!
//! ## Quick Start
//!
//! ```
//! use structured_nav::{generate_from_markdown, render, DisplayConfig, NavStyle};
//!
//! let text = "# Guide\n## Install +[[Requirements]]\n-- [[Setup]]\n## Usage\n";
//! let config = DisplayConfig::default().with_style(NavStyle::Decimal);
//!
//! let outline = generate_from_markdown(text, &config);
//! assert_eq!(outline.headings().len(), 3);
//!
//! let html = render::HtmlRenderer::new(&config).render(&outline);
//! assert!(html.contains("data-target=\"Requirements\""));
//! ```
//!
//! ## Pipeline
//!
//! - **annotate**: extracts cross-references and quick-links from the text
//! - **normalize**: merges annotations into headings and applies the depth filter
//! - **outline**: nests the filtered headings, bridging level gaps
//! - **config**: resolves per-block overrides against process-wide settings
//!
//! Every stage is a pure function of its inputs; [`view::NavView`] wires
//! them to document sources and change notifications.

pub mod annotate;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod outline;
pub mod render;
pub mod source;
pub mod view;

// Re-export commonly used types
pub use annotate::{extract_annotations, HeadingAnnotations};
pub use config::{
    load_settings, merge, save_settings, DisplayConfig, NavBlockConfig, NavStyle, Visibility,
};
pub use error::{Error, Result};
pub use model::{AnnotatedHeading, Heading, NoteReference, Outline, OutlineNode};
pub use normalize::{filter_headings, normalize};
pub use render::JsonFormat;
pub use source::{
    find_nav_blocks, scan_headings, ContentSource, FsSource, MarkdownScanner, MemorySource,
    NavBlock, StructureSource,
};
pub use view::{NavEvent, NavRender, NavView};

/// Derive the navigation outline for a document.
///
/// `content` is the document text. It is only scanned for annotations when
/// it is present and the configuration shows cross-references or
/// quick-links; otherwise headings pass through with empty reference lists.
///
/// # Example
///
/// ```
/// use structured_nav::{generate, DisplayConfig, Heading};
///
/// let headings = vec![Heading::new(1, "A", 0), Heading::new(3, "B", 2)];
/// let outline = generate(&headings, None, &DisplayConfig::default());
/// assert_eq!(outline.nodes().len(), 3); // A, a level-2 placeholder, B
/// ```
pub fn generate(headings: &[Heading], content: Option<&str>, config: &DisplayConfig) -> Outline {
    let annotations = match content {
        Some(text) if config.wants_annotations() => Some(extract_annotations(text, headings)),
        _ => None,
    };
    let filtered = normalize(
        headings,
        annotations.as_deref(),
        config.min_depth,
        config.max_depth,
    );
    outline::build(&filtered, config.style)
}

/// Scan a Markdown document and derive its navigation outline.
pub fn generate_from_markdown(text: &str, config: &DisplayConfig) -> Outline {
    let headings = scan_headings(text);
    generate(&headings, Some(text), config)
}

/// Render every `nav` block of a Markdown document.
///
/// Each block is resolved against `settings`; a malformed block yields a
/// [`NavRender::Error`] for that block only.
///
/// # Example
///
/// ```
/// use structured_nav::{render_nav_blocks, DisplayConfig, NavRender};
///
/// let text = "# Doc\n```nav\nstyle: inline\n```\n## Part\n";
/// let renders = render_nav_blocks("doc.md", text, &DisplayConfig::default());
/// assert_eq!(renders.len(), 1);
/// assert!(matches!(renders[0].1, NavRender::Outline { .. }));
/// ```
pub fn render_nav_blocks(
    path: &str,
    text: &str,
    settings: &DisplayConfig,
) -> Vec<(NavBlock, NavRender)> {
    let headings = scan_headings(text);
    find_nav_blocks(text)
        .into_iter()
        .map(|block| {
            let view = NavView::new(path, &block.source);
            let render = view.render_with_content(settings, Some(headings.clone()), Some(text));
            (block, render)
        })
        .collect()
}
