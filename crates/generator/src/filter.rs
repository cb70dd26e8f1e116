//! Member selection: decides which declared members end up in the interface
//! and extracts them into descriptors.

use autoface_protocol::{
    Accessibility, AccessorSymbol, AttributeData, MemberSymbol, MethodKind, MethodSymbol,
    ParameterSymbol, PropertySymbol, TypeSymbol,
};

use crate::cancel::CancellationToken;
use crate::config::MarkerNames;
use crate::error::Result;
use crate::keywords::unescape_identifier;
use crate::types::{
    AccessorDescriptor, GenericParameter, MemberDescriptor, MethodDescriptor, ParameterDescriptor,
    PropertyDescriptor,
};

/// Applies inclusion and exclusion rules to a type's members.
#[derive(Debug, Clone, Copy)]
pub struct MemberFilter<'a> {
    markers: &'a MarkerNames,
}

impl<'a> MemberFilter<'a> {
    #[must_use]
    pub const fn new(markers: &'a MarkerNames) -> Self {
        Self { markers }
    }

    /// Qualifying methods and properties of `ty`, in declaration order.
    ///
    /// `interface_name` is the unescaped name of the interface being
    /// generated; explicit implementations of it are included.
    pub fn select(
        &self,
        ty: &TypeSymbol,
        interface_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<MemberDescriptor>> {
        let mut selected = Vec::new();

        for member in &ty.members {
            cancel.check()?;

            let descriptor = match member {
                MemberSymbol::Method(method) => self
                    .method(method, interface_name)
                    .map(MemberDescriptor::Method),
                MemberSymbol::Property(property) => self
                    .property(property, interface_name)
                    .map(MemberDescriptor::Property),
                MemberSymbol::Field(_) | MemberSymbol::Event(_) => None,
            };

            match descriptor {
                Some(descriptor) => selected.push(descriptor),
                None => log::trace!("{}: skipping member {}", ty.name, member.name()),
            }
        }

        Ok(selected)
    }

    /// True when `attribute` is the marker configured as `marker`.
    #[must_use]
    pub fn is_marker(&self, attribute: &AttributeData, marker: &str) -> bool {
        matches_marker(attribute, marker, self.markers.namespace.as_deref())
    }

    fn is_excluded(&self, attributes: &[AttributeData]) -> bool {
        attributes
            .iter()
            .any(|a| self.is_marker(a, &self.markers.exclude))
    }

    fn method(&self, method: &MethodSymbol, interface_name: &str) -> Option<MethodDescriptor> {
        if method.method_kind != MethodKind::Ordinary || method.is_static {
            return None;
        }
        if !is_visible(
            method.declared_accessibility,
            method.explicit_interface.as_deref(),
            interface_name,
        ) || self.is_excluded(&method.attributes)
        {
            return None;
        }

        Some(MethodDescriptor {
            return_type: method.return_type.trim().to_string(),
            name: member_name(&method.name),
            parameters: method.parameters.iter().map(parameter).collect(),
            generics: method
                .type_parameters
                .iter()
                .map(GenericParameter::from_symbol)
                .collect(),
            attributes: attribute_syntax(&method.attributes),
            documentation: method.documentation.clone(),
            location: method.location.clone(),
        })
    }

    fn property(
        &self,
        property: &PropertySymbol,
        interface_name: &str,
    ) -> Option<PropertyDescriptor> {
        if property.is_indexer || property.is_static {
            return None;
        }
        if !is_visible(
            property.declared_accessibility,
            property.explicit_interface.as_deref(),
            interface_name,
        ) || self.is_excluded(&property.attributes)
        {
            return None;
        }

        let getter = property.getter.as_ref().and_then(|a| self.accessor(a));
        let setter = property.setter.as_ref().and_then(|a| self.accessor(a));
        if getter.is_none() && setter.is_none() {
            return None;
        }

        Some(PropertyDescriptor {
            type_name: property.type_name.trim().to_string(),
            name: member_name(&property.name),
            getter,
            setter,
            attributes: attribute_syntax(&property.attributes),
            documentation: property.documentation.clone(),
            location: property.location.clone(),
        })
    }

    fn accessor(&self, accessor: &AccessorSymbol) -> Option<AccessorDescriptor> {
        let restricted = accessor
            .declared_accessibility
            .is_some_and(|a| a != Accessibility::Public);
        if restricted || self.is_excluded(&accessor.attributes) {
            return None;
        }
        Some(AccessorDescriptor {
            kind: accessor.kind,
            attributes: attribute_syntax(&accessor.attributes),
        })
    }
}

/// Name match with or without the `Attribute` suffix. Namespaces are only
/// compared when both sides know theirs.
pub(crate) fn matches_marker(
    attribute: &AttributeData,
    marker: &str,
    namespace: Option<&str>,
) -> bool {
    let marker = marker
        .strip_suffix("Attribute")
        .filter(|m| !m.is_empty())
        .unwrap_or(marker);
    if attribute.short_name() != marker {
        return false;
    }

    let declared = attribute
        .namespace
        .as_deref()
        .or_else(|| attribute.name.rsplit_once('.').map(|(ns, _)| ns))
        .map(|ns| ns.trim_start_matches("global::"));

    match (namespace, declared) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => true,
    }
}

fn is_visible(
    accessibility: Accessibility,
    explicit_interface: Option<&str>,
    interface_name: &str,
) -> bool {
    match explicit_interface {
        Some(specifier) => simple_type_name(specifier) == interface_name,
        None => accessibility == Accessibility::Public,
    }
}

/// `global::App.IFoo<T>` → `IFoo`
pub(crate) fn simple_type_name(specifier: &str) -> &str {
    let specifier = specifier.trim();
    let specifier = specifier.strip_prefix("global::").unwrap_or(specifier);
    let without_args = specifier.split('<').next().unwrap_or(specifier);
    let simple = without_args.rsplit('.').next().unwrap_or(without_args);
    unescape_identifier(simple.trim())
}

/// Last segment of a possibly dotted explicit-implementation name.
fn member_name(name: &str) -> String {
    let name = name.trim();
    if name.contains('<') {
        // `IFoo<System.String>.Bar`: split after the closing bracket
        if let Some(idx) = name.rfind('>') {
            return name[idx + 1..].trim_start_matches('.').to_string();
        }
    }
    name.rsplit('.').next().unwrap_or(name).to_string()
}

fn parameter(parameter: &ParameterSymbol) -> ParameterDescriptor {
    ParameterDescriptor {
        type_name: parameter.type_name.trim().to_string(),
        name: parameter.name.trim().to_string(),
        modifier: parameter.modifier,
        attributes: attribute_syntax(&parameter.attributes),
        default_value: parameter.default_value.clone(),
    }
}

fn attribute_syntax(attributes: &[AttributeData]) -> Vec<String> {
    attributes
        .iter()
        .filter_map(|a| a.syntax.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
