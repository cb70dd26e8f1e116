use autoface_protocol::{
    AccessorKind, ConstantValue, InterfaceAccessibility, NullableContext, ParameterModifier,
    SourceLocation, TypeParameterSymbol,
};
use serde::{Deserialize, Serialize};

use crate::keywords::unescape_identifier;

/// Everything needed to emit one interface, extracted once from the host symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Simple class name, without generic arguments
    pub name: String,

    /// Dotted namespace path; `None` for the global namespace
    pub namespace: Option<String>,

    /// Generic parameters declared on the class
    pub generics: Vec<GenericParameter>,

    /// Interface name requested through the marker
    pub name_override: Option<String>,

    pub accessibility: InterfaceAccessibility,

    /// Extra interfaces to inherit from, in marker order
    pub base_interfaces: Vec<String>,

    pub nullable_context: NullableContext,

    /// Using directives visible at the declaration
    pub usings: Vec<String>,

    pub documentation: Option<String>,

    pub location: Option<SourceLocation>,

    /// Members that passed the filter, in declaration order
    pub members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    /// Interface name without keyword escaping: the override, or `I` + class name.
    #[must_use]
    pub fn interface_name(&self) -> String {
        let requested = self
            .name_override
            .as_deref()
            .map(|name| unescape_identifier(name.trim()))
            .unwrap_or_default();
        if requested.is_empty() {
            format!("I{}", unescape_identifier(&self.name))
        } else {
            requested.to_string()
        }
    }

    /// `<Namespace>.<Interface>[`Arity].g.<ext>`
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        let mut stem = String::new();
        if let Some(ns) = self.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            stem.push_str(ns);
            stem.push('.');
        }
        stem.push_str(&self.interface_name());
        if !self.generics.is_empty() {
            stem.push('`');
            stem.push_str(&self.generics.len().to_string());
        }
        format!("{stem}.g.{extension}")
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.members.iter().filter_map(|m| match m {
            MemberDescriptor::Property(p) => Some(p),
            MemberDescriptor::Method(_) => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.members.iter().filter_map(|m| match m {
            MemberDescriptor::Method(m) => Some(m),
            MemberDescriptor::Property(_) => None,
        })
    }
}

/// A generic parameter with its constraints in emission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParameter {
    pub name: String,
    pub constraints: Vec<Constraint>,
}

impl GenericParameter {
    /// Collect constraints in the order `unmanaged`, `notnull`, `struct`,
    /// `class`/`class?`, explicit types, `new()`.
    ///
    /// `unmanaged` implies `struct`, so a symbol reporting both yields only
    /// `unmanaged`.
    pub fn from_symbol(symbol: &TypeParameterSymbol) -> Self {
        let mut constraints = Vec::new();
        if symbol.has_unmanaged_type_constraint {
            constraints.push(Constraint::Unmanaged);
        }
        if symbol.has_not_null_constraint {
            constraints.push(Constraint::NotNull);
        }
        if symbol.has_value_type_constraint && !symbol.has_unmanaged_type_constraint {
            constraints.push(Constraint::Struct);
        }
        if symbol.has_reference_type_constraint {
            constraints.push(Constraint::Class {
                nullable: symbol.reference_type_constraint_nullable,
            });
        }
        constraints.extend(
            symbol
                .constraint_types
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(|t| Constraint::Type(t.to_string())),
        );
        if symbol.has_constructor_constraint {
            constraints.push(Constraint::New);
        }

        Self {
            name: symbol.name.clone(),
            constraints,
        }
    }

    /// C# allows at most one primary constraint, and `new()` never alongside
    /// `struct` or `unmanaged`.
    #[must_use]
    pub fn is_expressible(&self) -> bool {
        let primary = self.constraints.iter().filter(|c| c.is_primary()).count();
        let value_like = self
            .constraints
            .iter()
            .any(|c| matches!(c, Constraint::Struct | Constraint::Unmanaged));
        let has_new = self.constraints.contains(&Constraint::New);
        primary <= 1 && !(has_new && value_like)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Constraint {
    Unmanaged,
    NotNull,
    Struct,
    Class { nullable: bool },
    /// Base class or interface, as displayed by the host
    Type(String),
    New,
}

impl Constraint {
    const fn is_primary(&self) -> bool {
        matches!(
            self,
            Self::Unmanaged | Self::NotNull | Self::Struct | Self::Class { .. }
        )
    }

    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Unmanaged => "unmanaged",
            Self::NotNull => "notnull",
            Self::Struct => "struct",
            Self::Class { nullable: false } => "class",
            Self::Class { nullable: true } => "class?",
            Self::Type(name) => name.as_str(),
            Self::New => "new()",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberDescriptor {
    Method(MethodDescriptor),
    Property(PropertyDescriptor),
}

impl MemberDescriptor {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Method(m) => &m.name,
            Self::Property(p) => &p.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub generics: Vec<GenericParameter>,
    /// Attribute lists as written in source
    pub attributes: Vec<String>,
    pub documentation: Option<String>,
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub type_name: String,
    pub name: String,
    pub modifier: ParameterModifier,
    pub attributes: Vec<String>,
    pub default_value: Option<ConstantValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub type_name: String,
    pub name: String,
    pub getter: Option<AccessorDescriptor>,
    pub setter: Option<AccessorDescriptor>,
    pub attributes: Vec<String>,
    pub documentation: Option<String>,
    pub location: Option<SourceLocation>,
}

/// A surviving accessor; `kind` tells `set` from `init` for setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorDescriptor {
    pub kind: AccessorKind,
    pub attributes: Vec<String>,
}

/// One generated source file handed back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub file_name: String,
    pub text: String,
}
