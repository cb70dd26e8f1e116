use std::collections::BTreeSet;

use autoface_protocol::NullableContext;

use crate::cancel::CancellationToken;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::formatter::{constraint_clauses, generic_list, write_documentation, SignatureFormatter};
use crate::keywords::escape_identifier;
use crate::text_builder::TextBuilder;
use crate::types::TypeDescriptor;

const PREAMBLE: &str =
    "// <auto-generated>\n// This code was generated by a tool.\n// </auto-generated>";

const EDITOR_BROWSABLE_NEVER: &str =
    "[System.ComponentModel.EditorBrowsable(System.ComponentModel.EditorBrowsableState.Never)]";

/// Composes the file header and the member block into one source unit.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceAssembler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> InterfaceAssembler<'a> {
    #[must_use]
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Full text of the generated file for `ty`.
    pub fn assemble(&self, ty: &TypeDescriptor, cancel: &CancellationToken) -> Result<String> {
        let formatter = SignatureFormatter::new(self.config);
        let mut b = TextBuilder::new();

        if self.config.emit_preamble {
            b.line(PREAMBLE).line("");
        }

        b.line(nullable_directive(ty.nullable_context)).line("");

        for directive in using_directives(&ty.usings) {
            b.line(&directive);
        }
        b.line("");

        if let Some(ns) = ty.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            b.line(&format!("namespace {ns};")).line("");
        }

        write_documentation(&mut b, ty.documentation.as_deref());
        formatter.anchor(&mut b, ty.location.as_ref());
        if self.config.hide_from_editor {
            b.line(EDITOR_BROWSABLE_NEVER);
        }
        b.line(&format!(
            "[System.CodeDom.Compiler.GeneratedCode(\"{}\", \"{}\")]",
            self.config.tool.name, self.config.tool.version
        ));

        if let Some(keyword) = ty.accessibility.keyword() {
            b.append(keyword).append(" ");
        }
        b.append("partial interface ")
            .append(&escape_identifier(&ty.interface_name()))
            .append(&generic_list(&ty.generics));

        let bases = base_list(&ty.base_interfaces);
        if !bases.is_empty() {
            b.append(": ").join(", ", &bases);
        }
        b.line(&constraint_clauses(&ty.generics));

        b.block(|b| -> Result<()> {
            for property in ty.properties() {
                cancel.check()?;
                formatter.property(b, property);
                b.line("");
            }
            for method in ty.methods() {
                cancel.check()?;
                formatter.method(b, method);
                b.line("");
            }
            Ok(())
        })?;

        formatter.reset_anchor(&mut b);
        Ok(b.finish())
    }
}

fn nullable_directive(context: NullableContext) -> &'static str {
    match context {
        NullableContext::Enabled => "#nullable enable",
        NullableContext::Disabled => "#nullable disable",
        NullableContext::Annotations => "#nullable enable annotations",
        NullableContext::Warnings => "#nullable enable warnings",
    }
}

/// Distinct directives in ordinal order of their bodies. `global using`
/// already applies to the whole compilation and is left out.
fn using_directives(usings: &[String]) -> Vec<String> {
    let bodies: BTreeSet<String> = usings
        .iter()
        .map(|u| u.trim().trim_end_matches(';'))
        .filter(|u| !u.is_empty() && !u.starts_with("global "))
        .map(|u| u.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    bodies.into_iter().map(|u| format!("{u};")).collect()
}

fn base_list(bases: &[String]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    bases
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty() && seen.insert(*b))
        .collect()
}
