//! # Autoface Protocol
//!
//! The data contract between a host compiler and the interface generator.
//!
//! The host owns parsing and symbol resolution. It hands over each annotated
//! type as a [`TypeSymbol`]: plain, fully resolved data (names, display
//! strings, constraint flags, attribute option bags). Nothing in this crate
//! knows how to generate code; it only describes what the host saw.
//!
//! Snapshots are serde-friendly so a host can ship them as JSON:
//!
//! ```rust
//! use autoface_protocol::CompilationUnit;
//!
//! let unit = CompilationUnit::from_json(r#"{ "types": [] }"#).unwrap();
//! assert!(unit.types.is_empty());
//! ```

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod attributes;
pub mod location;
pub mod symbols;

pub use attributes::{AttributeData, InterfaceAccessibility};
pub use location::SourceLocation;
pub use symbols::{
    Accessibility, AccessorKind, AccessorSymbol, ConstantValue, EventSymbol, FieldSymbol,
    MemberSymbol, MethodKind, MethodSymbol, NullableContext, ParameterModifier, ParameterSymbol,
    PropertySymbol, TypeKind, TypeParameterSymbol, TypeSymbol,
};

/// Revision of the snapshot format, stamped into the exported schema.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Every type the host resolved in one generation pass.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct CompilationUnit {
    #[serde(default)]
    pub types: Vec<TypeSymbol>,
}

impl CompilationUnit {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("compilation unit snapshot is not valid JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

/// JSON schema of the snapshot format, for hosts that validate before sending.
pub fn snapshot_schema() -> Result<serde_json::Value> {
    let schema = schemars::schema_for!(CompilationUnit);
    let mut value = serde_json::to_value(schema).context("serialize snapshot schema")?;
    if let Some(object) = value.as_object_mut() {
        object.insert("x-snapshot-version".to_string(), SNAPSHOT_SCHEMA_VERSION.into());
    }
    Ok(value)
}
