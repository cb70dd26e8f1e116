use std::cell::Cell;

use autoface_protocol::SourceLocation;

use crate::config::GeneratorConfig;
use crate::keywords::escape_identifier;
use crate::literal;
use crate::text_builder::TextBuilder;
use crate::types::{GenericParameter, MethodDescriptor, ParameterDescriptor, PropertyDescriptor};

/// Renders member descriptors as interface member declarations.
///
/// Tracks whether a `#line` mapping is in effect so that declarations
/// without a location are not attributed to the previous anchor.
#[derive(Debug, Clone)]
pub struct SignatureFormatter<'a> {
    config: &'a GeneratorConfig,
    anchored: Cell<bool>,
}

impl<'a> SignatureFormatter<'a> {
    #[must_use]
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            anchored: Cell::new(false),
        }
    }

    /// `<ReturnType> <Name><Generics>(<Params>)<Constraints>;` preceded by
    /// docs, anchor and attribute lists.
    pub fn method(&self, b: &mut TextBuilder, method: &MethodDescriptor) {
        write_documentation(b, method.documentation.as_deref());
        self.anchor(b, method.location.as_ref());
        for attribute in &method.attributes {
            b.line(attribute);
        }

        b.append(&method.return_type)
            .append(" ")
            .append(&escape_identifier(&method.name))
            .append(&generic_list(&method.generics))
            .append("(")
            .join(", ", method.parameters.iter().map(parameter))
            .append(")")
            .append(&constraint_clauses(&method.generics))
            .line(";");
    }

    /// `<Type> <Name> { get; set; }` with only the surviving accessors.
    pub fn property(&self, b: &mut TextBuilder, property: &PropertyDescriptor) {
        write_documentation(b, property.documentation.as_deref());
        self.anchor(b, property.location.as_ref());
        for attribute in &property.attributes {
            b.line(attribute);
        }

        b.append(&property.type_name)
            .append(" ")
            .append(&escape_identifier(&property.name))
            .append(" {");
        for accessor in [&property.getter, &property.setter].into_iter().flatten() {
            b.append(" ");
            for attribute in &accessor.attributes {
                b.append(attribute).append(" ");
            }
            b.append(accessor.kind.keyword()).append(";");
        }
        b.line(" }");
    }

    /// `#line N "path"` when the location is known. Without a location,
    /// an active mapping is closed with `#line default`.
    pub fn anchor(&self, b: &mut TextBuilder, location: Option<&SourceLocation>) {
        if !self.config.emit_line_directives {
            return;
        }
        match location {
            Some(location) => {
                let path = location.display_path(self.config.source_root_str());
                b.line(&format!("#line {} \"{}\"", location.line, path));
                self.anchored.set(true);
            }
            None if self.anchored.get() => {
                b.line("#line default");
                self.anchored.set(false);
            }
            None => {}
        }
    }

    /// `#line default`, closing whatever anchors were emitted.
    pub fn reset_anchor(&self, b: &mut TextBuilder) {
        if self.config.emit_line_directives {
            b.line("#line default");
            self.anchored.set(false);
        }
    }
}

/// Doc comment lines, each trimmed, empty ones dropped.
pub fn write_documentation(b: &mut TextBuilder, documentation: Option<&str>) {
    let Some(documentation) = documentation else {
        return;
    };
    for line in documentation.lines().map(str::trim).filter(|l| !l.is_empty()) {
        b.line(line);
    }
}

/// `<T, U>`, or nothing for non-generic declarations.
#[must_use]
pub fn generic_list(generics: &[GenericParameter]) -> String {
    if generics.is_empty() {
        return String::new();
    }
    let names: Vec<_> = generics
        .iter()
        .map(|g| escape_identifier(&g.name))
        .collect();
    format!("<{}>", names.join(", "))
}

/// ` where T: c1, c2` per constrained parameter. Parameters whose
/// constraints C# cannot express get no clause.
#[must_use]
pub fn constraint_clauses(generics: &[GenericParameter]) -> String {
    let mut out = String::new();
    for generic in generics {
        if generic.constraints.is_empty() || !generic.is_expressible() {
            continue;
        }
        let constraints: Vec<_> = generic.constraints.iter().map(|c| c.as_text()).collect();
        out.push_str(&format!(
            " where {}: {}",
            escape_identifier(&generic.name),
            constraints.join(", ")
        ));
    }
    out
}

/// `[attrs] modifier Type name = default`
#[must_use]
pub fn parameter(parameter: &ParameterDescriptor) -> String {
    let mut out = String::new();
    for attribute in &parameter.attributes {
        out.push_str(attribute);
        out.push(' ');
    }
    if let Some(keyword) = parameter.modifier.keyword() {
        out.push_str(keyword);
        out.push(' ');
    }
    out.push_str(&parameter.type_name);
    out.push(' ');
    out.push_str(&escape_identifier(&parameter.name));
    if let Some(value) = &parameter.default_value {
        out.push_str(" = ");
        out.push_str(&literal::render(value));
    }
    out
}
