use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::attributes::AttributeData;
use crate::location::SourceLocation;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Record,
    Interface,
}

impl TypeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Record => "record",
            Self::Interface => "interface",
        }
    }
}

/// Nullable annotation context in effect at the type's declaration.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NullableContext {
    #[default]
    Enabled,
    Disabled,
    /// Annotations enabled, warnings left to the project default.
    Annotations,
    /// Warnings enabled, annotations left to the project default.
    Warnings,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    #[default]
    Private,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Plain method, including explicit interface implementations.
    #[default]
    Ordinary,
    Constructor,
    StaticConstructor,
    Destructor,
    PropertyAccessor,
    EventAccessor,
    Operator,
    Conversion,
}

/// A resolved type annotated (or not) with generator markers.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct TypeSymbol {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Dotted namespace path; `None` for the global namespace.
    #[serde(default)]
    pub containing_namespace: Option<String>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSymbol>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<MemberSymbol>,
    /// Raw `///` documentation trivia attached to the declaration.
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    #[serde(default)]
    pub nullable_context: NullableContext,
    /// Using directives from every enclosing scope, as written.
    #[serde(default)]
    pub usings: Vec<String>,
}

impl TypeSymbol {
    /// Bare class symbol, handy for hosts assembling symbols by hand.
    pub fn class(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            name: name.into(),
            containing_namespace: namespace.map(str::to_string),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: impl Into<MemberSymbol>) -> Self {
        self.members.push(member.into());
        self
    }

    #[must_use]
    pub fn with_type_parameter(mut self, parameter: TypeParameterSymbol) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_using(mut self, directive: impl Into<String>) -> Self {
        self.usings.push(directive.into());
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct TypeParameterSymbol {
    pub name: String,
    #[serde(default)]
    pub has_reference_type_constraint: bool,
    /// `class?` rather than `class`.
    #[serde(default)]
    pub reference_type_constraint_nullable: bool,
    #[serde(default)]
    pub has_value_type_constraint: bool,
    #[serde(default)]
    pub has_unmanaged_type_constraint: bool,
    #[serde(default)]
    pub has_not_null_constraint: bool,
    #[serde(default)]
    pub has_constructor_constraint: bool,
    /// Base class and interface constraints, display strings in symbol order.
    #[serde(default)]
    pub constraint_types: Vec<String>,
}

impl TypeParameterSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberSymbol {
    Method(MethodSymbol),
    Property(PropertySymbol),
    Field(FieldSymbol),
    Event(EventSymbol),
}

impl MemberSymbol {
    pub fn name(&self) -> &str {
        match self {
            Self::Method(m) => &m.name,
            Self::Property(p) => &p.name,
            Self::Field(f) => &f.name,
            Self::Event(e) => &e.name,
        }
    }
}

impl From<MethodSymbol> for MemberSymbol {
    fn from(value: MethodSymbol) -> Self {
        Self::Method(value)
    }
}

impl From<PropertySymbol> for MemberSymbol {
    fn from(value: PropertySymbol) -> Self {
        Self::Property(value)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct MethodSymbol {
    /// Simple name. A dotted explicit-implementation name (`IFoo.Bar`) is
    /// also accepted; the generator keeps the last segment.
    pub name: String,
    #[serde(default)]
    pub method_kind: MethodKind,
    #[serde(default)]
    pub declared_accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    /// Interface named by an explicit implementation (`int IFoo.Bar()`).
    #[serde(default)]
    pub explicit_interface: Option<String>,
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSymbol>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl MethodSymbol {
    /// Public, ordinary, instance method.
    pub fn public(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            declared_accessibility: Accessibility::Public,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterSymbol) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParameterModifier {
    #[default]
    None,
    Ref,
    Out,
    In,
    RefReadonly,
    Params,
}

impl ParameterModifier {
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Ref => Some("ref"),
            Self::Out => Some("out"),
            Self::In => Some("in"),
            Self::RefReadonly => Some("ref readonly"),
            Self::Params => Some("params"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct ParameterSymbol {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub modifier: ParameterModifier,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    /// Compile-time default, when the parameter is optional.
    #[serde(default)]
    pub default_value: Option<ConstantValue>,
}

impl ParameterSymbol {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: ConstantValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct PropertySymbol {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub declared_accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_indexer: bool,
    #[serde(default)]
    pub explicit_interface: Option<String>,
    #[serde(default)]
    pub getter: Option<AccessorSymbol>,
    #[serde(default)]
    pub setter: Option<AccessorSymbol>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl PropertySymbol {
    /// Public instance property with a plain `get; set;` pair.
    pub fn public(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            declared_accessibility: Accessibility::Public,
            getter: Some(AccessorSymbol::new(AccessorKind::Get)),
            setter: Some(AccessorSymbol::new(AccessorKind::Set)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    #[default]
    Get,
    Set,
    Init,
}

impl AccessorKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Init => "init",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, JsonSchema)]
pub struct AccessorSymbol {
    #[serde(default)]
    pub kind: AccessorKind,
    /// Accessor-level modifier (`private set`); `None` inherits the property's.
    #[serde(default)]
    pub declared_accessibility: Option<Accessibility>,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
}

impl AccessorSymbol {
    pub fn new(kind: AccessorKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct FieldSymbol {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct EventSymbol {
    pub name: String,
    #[serde(default)]
    pub type_name: Option<String>,
}

/// A compile-time constant as the host resolved it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Char(char),
    String(String),
    Sbyte(i8),
    Byte(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Single(f32),
    Double(f64),
    /// Decimal digits as written, without the `M` suffix.
    Decimal(String),
    /// Expression text to copy verbatim (enum members, `default(T)`, ...).
    Raw(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn constant_values_use_kind_tags() {
        let value: ConstantValue =
            serde_json::from_str(r#"{ "kind": "single", "value": 1.5 }"#).unwrap();
        assert_eq!(value, ConstantValue::Single(1.5));

        let null: ConstantValue = serde_json::from_str(r#"{ "kind": "null" }"#).unwrap();
        assert_eq!(null, ConstantValue::Null);
    }

    #[test]
    fn property_defaults_to_private_without_accessors() {
        let prop: PropertySymbol =
            serde_json::from_str(r#"{ "name": "Message", "type_name": "string" }"#).unwrap();
        assert_eq!(prop.declared_accessibility, Accessibility::Private);
        assert!(prop.getter.is_none());
        assert!(prop.setter.is_none());
    }

    #[test]
    fn builders_compose_a_class() {
        let ty = TypeSymbol::class("MyClass", Some("TestNamespace"))
            .with_member(MethodSymbol::public("Add", "int"))
            .with_member(PropertySymbol::public("Message", "string"))
            .with_using("using System;");

        assert_eq!(ty.members.len(), 2);
        assert_eq!(ty.members[0].name(), "Add");
        assert_eq!(ty.members[1].name(), "Message");
        assert_eq!(ty.usings, vec!["using System;".to_string()]);
    }

    #[test]
    fn modifier_keywords() {
        assert_eq!(ParameterModifier::None.keyword(), None);
        assert_eq!(ParameterModifier::RefReadonly.keyword(), Some("ref readonly"));
        assert_eq!(AccessorKind::Init.keyword(), "init");
    }
}
