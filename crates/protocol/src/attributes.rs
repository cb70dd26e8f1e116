use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A resolved attribute instance: name plus an option bag.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct AttributeData {
    /// Attribute class name, with or without the `Attribute` suffix.
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Display strings of generic arguments (`Implements<IFoo>` → `["IFoo"]`).
    #[serde(default)]
    pub type_arguments: Vec<String>,
    #[serde(default)]
    pub named_arguments: BTreeMap<String, serde_json::Value>,
    /// The attribute list exactly as written in source, e.g. `[Obsolete("x")]`.
    /// Metadata-only attributes have none and are never re-emitted.
    #[serde(default)]
    pub syntax: Option<String>,
}

impl AttributeData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attribute known only by its source text; the name is derived from it.
    pub fn from_syntax(syntax: impl Into<String>) -> Self {
        let syntax = syntax.into();
        let name = syntax
            .trim_start_matches('[')
            .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .next()
            .unwrap_or_default()
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            name,
            syntax: Some(syntax),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_type_argument(mut self, type_argument: impl Into<String>) -> Self {
        self.type_arguments.push(type_argument.into());
        self
    }

    #[must_use]
    pub fn with_named_argument(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.named_arguments.insert(name.into(), value.into());
        self
    }

    /// Name without the conventional `Attribute` suffix.
    pub fn short_name(&self) -> &str {
        let name = self.name.rsplit('.').next().unwrap_or(&self.name);
        match name.strip_suffix("Attribute") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => name,
        }
    }

    pub fn named_argument(&self, name: &str) -> Option<&serde_json::Value> {
        self.named_arguments.get(name)
    }
}

/// Accessibility requested for a generated interface.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceAccessibility {
    #[default]
    Public,
    Internal,
    /// No keyword; another partial declaration decides.
    None,
}

impl InterfaceAccessibility {
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Internal => Some("internal"),
            Self::None => None,
        }
    }

    /// Parse a marker option value: `"Internal"`, `"InterfaceAccessibility.None"`,
    /// or the enum's underlying integer.
    pub fn from_option(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => match n.as_u64()? {
                0 => Some(Self::Public),
                1 => Some(Self::Internal),
                2 => Some(Self::None),
                _ => None,
            },
            serde_json::Value::String(s) => {
                let member = s.trim().rsplit('.').next()?;
                match member.to_ascii_lowercase().as_str() {
                    "public" => Some(Self::Public),
                    "internal" => Some(Self::Internal),
                    "none" => Some(Self::None),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
