//! Rendering module for converting navigation to various output formats.

mod html;
mod json;
mod marker;
mod text;

pub use html::{to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use marker::{is_numbered, list_marker};
pub use text::{to_text, TextRenderer};

/// Message shown when no heading is left to display.
pub const EMPTY_MESSAGE: &str = "No headings found";
