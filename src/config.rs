//! Display configuration and per-block overrides.
//!
//! Navigation is configured in two stages. Process-wide settings
//! ([`DisplayConfig`], persisted as camelCase JSON) provide the defaults,
//! and each `nav` block may carry a YAML override ([`NavBlockConfig`],
//! snake_case fields). [`merge`] combines the two field by field.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the navigation is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavStyle {
    /// Bullet list
    #[default]
    Bullet,
    /// Numbered list (1, 2, 3)
    Number,
    /// Decimal numbering (1.1, 1.2.1)
    Decimal,
    /// Traditional outline numbering (I, A, 1, a)
    Outline,
    /// Top-level headings on a single line
    Inline,
}

impl NavStyle {
    /// Name used in settings, blocks and CSS classes.
    pub fn as_str(&self) -> &'static str {
        match self {
            NavStyle::Bullet => "bullet",
            NavStyle::Number => "number",
            NavStyle::Decimal => "decimal",
            NavStyle::Outline => "outline",
            NavStyle::Inline => "inline",
        }
    }

    /// Check if the style renders a nested list.
    pub fn is_hierarchical(&self) -> bool {
        !matches!(self, NavStyle::Inline)
    }
}

impl std::fmt::Display for NavStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NavStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bullet" => Ok(NavStyle::Bullet),
            "number" => Ok(NavStyle::Number),
            "decimal" => Ok(NavStyle::Decimal),
            "outline" => Ok(NavStyle::Outline),
            "inline" => Ok(NavStyle::Inline),
            other => Err(Error::Config(format!("unknown style `{}`", other))),
        }
    }
}

/// Show/hide switch used for reference settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Show,
    Hide,
}

impl Visibility {
    pub fn is_shown(self) -> bool {
        self == Visibility::Show
    }
}

impl From<bool> for Visibility {
    fn from(show: bool) -> Self {
        if show {
            Visibility::Show
        } else {
            Visibility::Hide
        }
    }
}

/// Stores a `bool` as `"show"` / `"hide"`.
mod visibility {
    use super::Visibility;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(show: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        Visibility::from(*show).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Visibility::deserialize(deserializer).map(Visibility::is_shown)
    }
}

/// Fully resolved display configuration.
///
/// This is also the shape of the persisted process-wide settings; absent
/// fields take their default value when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Layout style
    pub style: NavStyle,

    /// Smallest heading level to include (1 = H1)
    pub min_depth: u8,

    /// Largest heading level to include (6 = H6)
    pub max_depth: u8,

    /// Title shown above the navigation (empty = none)
    pub title: String,

    /// Separator for the inline style
    pub delimiter: String,

    /// Symbol for bullet lists (empty = default bullet)
    pub bullet_symbol: String,

    /// Show `+[[Note]]` references next to headings
    #[serde(rename = "refs", with = "visibility")]
    pub show_cross_refs: bool,

    /// Show `-- [[Note]]` quick-links under headings
    #[serde(rename = "quickLinks", with = "visibility")]
    pub show_quick_links: bool,

    /// Prefix placed before each quick-link
    pub quick_link_prefix: String,
}

impl DisplayConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout style.
    pub fn with_style(mut self, style: NavStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the depth range.
    pub fn with_depth(mut self, min_depth: u8, max_depth: u8) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the inline delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the bullet symbol.
    pub fn with_bullet_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.bullet_symbol = symbol.into();
        self
    }

    /// Show or hide cross-references.
    pub fn with_cross_refs(mut self, show: bool) -> Self {
        self.show_cross_refs = show;
        self
    }

    /// Show or hide quick-links.
    pub fn with_quick_links(mut self, show: bool) -> Self {
        self.show_quick_links = show;
        self
    }

    /// Set the quick-link prefix.
    pub fn with_quick_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.quick_link_prefix = prefix.into();
        self
    }

    /// Check if any annotation feature needs the document text.
    pub fn wants_annotations(&self) -> bool {
        self.show_cross_refs || self.show_quick_links
    }

    /// Parse settings from JSON, filling absent fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(|e| Error::Settings(e.to_string()))
    }

    /// Serialize settings to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Settings(e.to_string()))
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            style: NavStyle::Bullet,
            min_depth: 1,
            max_depth: 6,
            title: "Table of Contents".to_string(),
            delimiter: " | ".to_string(),
            bullet_symbol: String::new(),
            show_cross_refs: true,
            show_quick_links: true,
            quick_link_prefix: "→".to_string(),
        }
    }
}

/// Load settings from a JSON file.
///
/// A missing file yields the defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<DisplayConfig> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("No settings at {}, using defaults", path.display());
        return Ok(DisplayConfig::default());
    }
    let json = fs::read_to_string(path)?;
    DisplayConfig::from_json(&json)
}

/// Save settings to a JSON file.
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &DisplayConfig) -> Result<()> {
    fs::write(path, settings.to_json()?)?;
    Ok(())
}

/// Per-block override, as written inside a `nav` block.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavBlockConfig {
    #[serde(
        default,
        deserialize_with = "block_field::style",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<NavStyle>,
    #[serde(
        default,
        deserialize_with = "block_field::min_depth",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_depth: Option<u8>,
    #[serde(
        default,
        deserialize_with = "block_field::max_depth",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_depth: Option<u8>,
    #[serde(
        default,
        deserialize_with = "block_field::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "block_field::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub delimiter: Option<String>,
    #[serde(
        default,
        deserialize_with = "block_field::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub bullet_symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "block_field::visibility",
        skip_serializing_if = "Option::is_none"
    )]
    pub refs: Option<Visibility>,
    #[serde(
        default,
        deserialize_with = "block_field::visibility",
        skip_serializing_if = "Option::is_none"
    )]
    pub quick_links: Option<Visibility>,
    #[serde(
        default,
        deserialize_with = "block_field::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub quick_link_prefix: Option<String>,
}

/// Field readers for hand-written blocks.
///
/// Any YAML scalar is accepted where text is expected (`title: 2024`), depths
/// may be numeric strings, and `refs` / `quick_links` also take booleans.
/// Values that still make no sense are dropped so the setting falls through.
mod block_field {
    use super::{NavStyle, Visibility};
    use serde::{Deserialize, Deserializer};
    use serde_yaml::Value;

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => scalar(tagged.value),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    fn number(value: Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Tagged(tagged) => number(tagged.value),
            _ => None,
        }
    }

    fn depth<'de, D: Deserializer<'de>>(
        deserializer: D,
        round: fn(f64) -> f64,
    ) -> Result<Option<u8>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let depth = number(value.clone())
            .filter(|n| n.is_finite())
            .map(|n| round(n).clamp(0.0, f64::from(u8::MAX)) as u8);
        if depth.is_none() && !value.is_null() {
            log::warn!("Ignoring nav block depth {:?}", value);
        }
        Ok(depth)
    }

    /// Fractional minimums round up: `level >= 2.5` starts at 3.
    pub fn min_depth<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
        depth(deserializer, f64::ceil)
    }

    pub fn max_depth<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
        depth(deserializer, f64::floor)
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let text = scalar(value.clone());
        if text.is_none() && !value.is_null() {
            log::warn!("Ignoring nav block text {:?}", value);
        }
        Ok(text)
    }

    pub fn style<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NavStyle>, D::Error> {
        let Some(name) = text(deserializer)? else {
            return Ok(None);
        };
        match name.parse() {
            Ok(style) => Ok(Some(style)),
            Err(_) => {
                log::warn!("Ignoring unknown nav style `{}`", name);
                Ok(None)
            }
        }
    }

    pub fn visibility<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Visibility>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let visibility = match &value {
            Value::Bool(show) => Some(Visibility::from(*show)),
            _ => match scalar(value.clone()).as_deref().map(str::trim) {
                Some(v) if v.eq_ignore_ascii_case("show") => Some(Visibility::Show),
                Some(v) if v.eq_ignore_ascii_case("hide") => Some(Visibility::Hide),
                _ => None,
            },
        };
        if visibility.is_none() && !value.is_null() {
            log::warn!("Ignoring nav block visibility {:?}", value);
        }
        Ok(visibility)
    }
}

impl NavBlockConfig {
    /// Parse the YAML body of a `nav` block.
    ///
    /// A blank body, or YAML that is not a mapping, gives an empty override.
    pub fn parse(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(source)?;
        if !value.is_mapping() {
            log::debug!("nav block is not a mapping, ignoring it");
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_value(value)?)
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Resolve a block override against the process-wide defaults.
pub fn merge(defaults: &DisplayConfig, block: &NavBlockConfig) -> DisplayConfig {
    DisplayConfig {
        style: block.style.unwrap_or(defaults.style),
        min_depth: block.min_depth.unwrap_or(defaults.min_depth),
        max_depth: block.max_depth.unwrap_or(defaults.max_depth),
        title: block.title.clone().unwrap_or_else(|| defaults.title.clone()),
        delimiter: block
            .delimiter
            .clone()
            .unwrap_or_else(|| defaults.delimiter.clone()),
        bullet_symbol: block
            .bullet_symbol
            .clone()
            .unwrap_or_else(|| defaults.bullet_symbol.clone()),
        show_cross_refs: block
            .refs
            .map_or(defaults.show_cross_refs, Visibility::is_shown),
        show_quick_links: block
            .quick_links
            .map_or(defaults.show_quick_links, Visibility::is_shown),
        quick_link_prefix: block
            .quick_link_prefix
            .clone()
            .unwrap_or_else(|| defaults.quick_link_prefix.clone()),
    }
}
