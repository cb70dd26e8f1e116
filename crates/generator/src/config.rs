use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};

// C# identifiers: a letter or underscore, then letters, digits, connectors,
// combining marks and formatting characters.
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@?[\p{L}\p{Nl}_][\p{L}\p{Nl}\p{Mn}\p{Mc}\p{Nd}\p{Pc}\p{Cf}]*$")
        .expect("valid identifier regex")
});

static MARKER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid marker regex"));

static DOTTED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").expect("valid dotted regex")
});

/// True for a single C# identifier (optionally `@`-escaped).
pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}

/// Configuration for interface generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name and version stamped into `[GeneratedCode]`
    pub tool: ToolStamp,

    /// Extension of artifact file names (`<name>.g.<ext>`)
    pub file_extension: String,

    /// Emit the `// <auto-generated>` comment header
    pub emit_preamble: bool,

    /// Emit `#line` anchors back to the annotated declarations
    pub emit_line_directives: bool,

    /// Mark the interface `[EditorBrowsable(Never)]`
    pub hide_from_editor: bool,

    /// Anchor paths are made relative to this directory when under it
    pub source_root: Option<PathBuf>,

    /// Marker attribute names recognized on symbols
    pub markers: MarkerNames,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tool: ToolStamp::default(),
            file_extension: "cs".to_string(),
            emit_preamble: true,
            emit_line_directives: true,
            hide_from_editor: false,
            source_root: None,
            markers: MarkerNames::default(),
        }
    }
}

impl GeneratorConfig {
    /// Only the interface itself: no preamble, no `#line` anchors.
    pub fn compact() -> Self {
        Self {
            emit_preamble: false,
            emit_line_directives: false,
            ..Default::default()
        }
    }

    /// Builder: set the tool stamp
    #[must_use]
    pub fn with_tool(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.tool = ToolStamp {
            name: name.into(),
            version: version.into(),
        };
        self
    }

    /// Parse TOML; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tool.name.trim().is_empty() {
            return Err(GeneratorError::invalid_config("tool.name must not be empty"));
        }
        if self.tool.version.trim().is_empty() {
            return Err(GeneratorError::invalid_config("tool.version must not be empty"));
        }
        if self.tool.name.contains('"') || self.tool.version.contains('"') {
            return Err(GeneratorError::invalid_config(
                "tool name and version must not contain quotes",
            ));
        }

        let ext = &self.file_extension;
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GeneratorError::invalid_config(format!(
                "file_extension ({ext:?}) must be a non-empty alphanumeric extension"
            )));
        }

        self.markers.validate()
    }

    pub(crate) fn source_root_str(&self) -> Option<&str> {
        self.source_root.as_deref().and_then(Path::to_str)
    }
}

/// The generator's own identity, stamped into every artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStamp {
    pub name: String,
    pub version: String,
}

impl Default for ToolStamp {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Names of the marker attributes, without the `Attribute` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerNames {
    /// Namespace the markers live in; `None` accepts any namespace
    pub namespace: Option<String>,
    /// Trigger marker placed on the class
    pub auto_interface: String,
    /// `Implements<T>` marker adding a base interface
    pub implements: String,
    /// Exclusion marker on members and accessors
    pub exclude: String,
}

impl Default for MarkerNames {
    fn default() -> Self {
        Self {
            namespace: Some("Autoface".to_string()),
            auto_interface: "AutoInterface".to_string(),
            implements: "Implements".to_string(),
            exclude: "ExcludeFromInterface".to_string(),
        }
    }
}

impl MarkerNames {
    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("auto_interface", &self.auto_interface),
            ("implements", &self.implements),
            ("exclude", &self.exclude),
        ] {
            if !MARKER_NAME.is_match(value) {
                return Err(GeneratorError::invalid_config(format!(
                    "markers.{key} ({value:?}) must be a plain identifier"
                )));
            }
        }

        if let Some(ns) = &self.namespace {
            if !DOTTED_NAME.is_match(ns) {
                return Err(GeneratorError::invalid_config(format!(
                    "markers.namespace ({ns:?}) must be a dotted namespace"
                )));
            }
        }

        Ok(())
    }
}
