//! JSON rendering for navigation.

use crate::error::{Error, Result};
use crate::view::NavRender;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a render outcome to JSON.
pub fn to_json(render: &NavRender, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(render),
        JsonFormat::Compact => serde_json::to_string(render),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
