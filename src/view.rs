//! Lifecycle of a single navigation instance.
//!
//! A [`NavView`] belongs to one `nav` block in one document. It decides
//! which notifications require a fresh render and re-derives the outline
//! from current settings, headings and text on every pass. Nothing is
//! cached between passes, so a late result from a superseded render can
//! simply be overwritten by the next one.

use serde::{Deserialize, Serialize};

use crate::config::{merge, DisplayConfig, NavBlockConfig};
use crate::model::{Heading, Outline};
use crate::source::{ContentSource, StructureSource};

/// Notification that may require a navigation to be re-rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// A document was modified; only views of that document react.
    DocumentChanged { path: String },

    /// The process-wide settings changed; every view reacts.
    SettingsChanged,
}

/// Outcome of a render pass, ready for a rendering sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NavRender {
    /// Headings were found
    Outline {
        config: DisplayConfig,
        outline: Outline,
    },

    /// No heading survived (missing structure, empty document, depth filter)
    Empty { config: DisplayConfig },

    /// The nav block could not be parsed; nothing else is shown
    Error { message: String },
}

impl NavRender {
    /// Resolved configuration, unless the block was malformed.
    pub fn config(&self) -> Option<&DisplayConfig> {
        match self {
            NavRender::Outline { config, .. } | NavRender::Empty { config } => Some(config),
            NavRender::Error { .. } => None,
        }
    }

    /// Outline, if there is one.
    pub fn outline(&self) -> Option<&Outline> {
        match self {
            NavRender::Outline { outline, .. } => Some(outline),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, NavRender::Error { .. })
    }
}

/// One navigation instance bound to a document.
#[derive(Debug, Clone)]
pub struct NavView {
    source_path: String,
    block: Result<NavBlockConfig, String>,
}

impl NavView {
    /// Create a view from the raw body of a `nav` block.
    ///
    /// A malformed body is remembered; every render then reports it.
    pub fn new(source_path: impl Into<String>, block_source: &str) -> Self {
        let source_path = source_path.into();
        let block = NavBlockConfig::parse(block_source).map_err(|e| {
            log::warn!("Invalid nav block in {}: {}", source_path, e);
            e.to_string()
        });
        Self { source_path, block }
    }

    /// Create a view from an already parsed override.
    pub fn with_block(source_path: impl Into<String>, block: NavBlockConfig) -> Self {
        Self {
            source_path: source_path.into(),
            block: Ok(block),
        }
    }

    /// Path of the document this view displays.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// The parsed override, if the block was valid.
    pub fn block(&self) -> Option<&NavBlockConfig> {
        self.block.as_ref().ok()
    }

    /// Whether an event requires this view to render again.
    pub fn handle(&self, event: &NavEvent) -> bool {
        match event {
            NavEvent::DocumentChanged { path } => *path == self.source_path,
            NavEvent::SettingsChanged => true,
        }
    }

    /// Resolve the configuration against the current settings.
    pub fn config(&self, settings: &DisplayConfig) -> Option<DisplayConfig> {
        self.block().map(|block| merge(settings, block))
    }

    /// Run a render pass against the given collaborators.
    ///
    /// The text is only requested when an annotation feature is enabled.
    pub fn render<S, C>(&self, settings: &DisplayConfig, structure: &S, content: &C) -> NavRender
    where
        S: StructureSource + ?Sized,
        C: ContentSource + ?Sized,
    {
        let config = match self.resolve(settings) {
            Ok(config) => config,
            Err(error) => return error,
        };
        let headings = structure.headings(&self.source_path);
        let text = if config.wants_annotations() {
            content.content(&self.source_path)
        } else {
            None
        };
        self.finish(config, headings, text.as_deref())
    }

    /// Run a render pass with headings and text that were read elsewhere.
    pub fn render_with_content(
        &self,
        settings: &DisplayConfig,
        headings: Option<Vec<Heading>>,
        content: Option<&str>,
    ) -> NavRender {
        match self.resolve(settings) {
            Ok(config) => self.finish(config, headings, content),
            Err(error) => error,
        }
    }

    fn finish(
        &self,
        config: DisplayConfig,
        headings: Option<Vec<Heading>>,
        content: Option<&str>,
    ) -> NavRender {
        let headings = headings.unwrap_or_default();
        let outline = crate::generate(&headings, content, &config);
        log::debug!(
            "Rendered nav for {} ({} headings in source)",
            self.source_path,
            headings.len()
        );
        if outline.is_empty() {
            NavRender::Empty { config }
        } else {
            NavRender::Outline { config, outline }
        }
    }

    fn resolve(&self, settings: &DisplayConfig) -> Result<DisplayConfig, NavRender> {
        match &self.block {
            Ok(block) => Ok(merge(settings, block)),
            Err(message) => Err(NavRender::Error {
                message: message.clone(),
            }),
        }
    }
}
