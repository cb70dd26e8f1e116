use std::collections::HashSet;

use autoface_protocol::{
    AttributeData, CompilationUnit, InterfaceAccessibility, TypeKind, TypeSymbol,
};
use serde::Serialize;

use crate::assembler::InterfaceAssembler;
use crate::cancel::CancellationToken;
use crate::config::{is_identifier, GeneratorConfig};
use crate::diagnostics::{Diagnostic, DiagnosticId};
use crate::error::{GeneratorError, Result};
use crate::filter::{matches_marker, MemberFilter};
use crate::types::{GeneratedArtifact, GenericParameter, MemberDescriptor, TypeDescriptor};

const NAME_OPTION: &str = "Name";
const ACCESSIBILITY_OPTION: &str = "Accessibility";

/// Extraction result: the descriptor plus whatever was worth reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Description {
    pub descriptor: TypeDescriptor,
    pub diagnostics: Vec<Diagnostic>,
}

/// One generated file and the diagnostics raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutput {
    pub artifact: GeneratedArtifact,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of a whole compilation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub artifacts: Vec<GeneratedArtifact>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Entry point used by hosts: annotated type symbol in, interface text out.
///
/// Holds nothing but its configuration, so one instance can serve
/// concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct InterfaceGenerator {
    config: GeneratorConfig,
}

impl InterfaceGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// True when `ty` carries the trigger marker.
    #[must_use]
    pub fn is_annotated(&self, ty: &TypeSymbol) -> bool {
        self.trigger(ty).is_some()
    }

    /// Generate the interface for one annotated class.
    pub fn generate(
        &self,
        ty: &TypeSymbol,
        cancel: &CancellationToken,
    ) -> Result<GenerationOutput> {
        let Description {
            descriptor,
            diagnostics,
        } = self.describe(ty, cancel)?;

        let text = InterfaceAssembler::new(&self.config).assemble(&descriptor, cancel)?;
        let artifact = GeneratedArtifact {
            file_name: descriptor.file_name(&self.config.file_extension),
            text,
        };

        log::debug!(
            "Generated {} with {} members",
            artifact.file_name,
            descriptor.members.len()
        );
        for diagnostic in &diagnostics {
            log::warn!("{diagnostic}");
        }

        Ok(GenerationOutput {
            artifact,
            diagnostics,
        })
    }

    /// Extract the descriptor for `ty` without emitting any text.
    pub fn describe(&self, ty: &TypeSymbol, cancel: &CancellationToken) -> Result<Description> {
        let trigger = self
            .trigger(ty)
            .ok_or_else(|| GeneratorError::NotAnnotated(ty.name.clone()))?;

        if ty.kind != TypeKind::Class {
            return Err(GeneratorError::UnsupportedTarget {
                name: ty.name.clone(),
                kind: ty.kind.as_str(),
            });
        }
        if !is_identifier(ty.name.trim()) {
            return Err(GeneratorError::invalid_symbol(format!(
                "type name {:?} is not an identifier",
                ty.name
            )));
        }

        let mut diagnostics = Vec::new();
        let name_override = self.name_option(ty, trigger, &mut diagnostics);
        let accessibility = self.accessibility_option(ty, trigger, &mut diagnostics);
        let base_interfaces = self.base_interfaces(ty, &mut diagnostics);

        let mut descriptor = TypeDescriptor {
            name: ty.name.trim().to_string(),
            namespace: ty
                .containing_namespace
                .as_deref()
                .map(str::trim)
                .filter(|ns| !ns.is_empty())
                .map(str::to_string),
            generics: ty
                .type_parameters
                .iter()
                .map(GenericParameter::from_symbol)
                .collect(),
            name_override,
            accessibility,
            base_interfaces,
            nullable_context: ty.nullable_context,
            usings: ty.usings.clone(),
            documentation: ty.documentation.clone(),
            location: ty.location.clone(),
            members: Vec::new(),
        };

        descriptor.members = MemberFilter::new(&self.config.markers).select(
            ty,
            &descriptor.interface_name(),
            cancel,
        )?;

        self.check_constraints(ty, &descriptor, &mut diagnostics);

        Ok(Description {
            descriptor,
            diagnostics,
        })
    }

    /// Run every annotated type of `unit`.
    ///
    /// A failing type becomes a diagnostic and the pass continues; when two
    /// types claim the same file name the first one wins. Cancellation
    /// aborts the pass and discards everything produced so far.
    pub fn generate_all(
        &self,
        unit: &CompilationUnit,
        cancel: &CancellationToken,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();
        let mut file_names = HashSet::new();

        for ty in &unit.types {
            cancel.check()?;
            if !self.is_annotated(ty) {
                log::trace!("{}: not annotated", ty.name);
                continue;
            }

            match self.generate(ty, cancel) {
                Ok(output) => {
                    report.diagnostics.extend(output.diagnostics);
                    if file_names.insert(output.artifact.file_name.clone()) {
                        report.artifacts.push(output.artifact);
                    } else {
                        let diagnostic = Diagnostic::new(
                            DiagnosticId::DuplicateFileName,
                            format!(
                                "{} would overwrite an artifact generated earlier; skipped",
                                output.artifact.file_name
                            ),
                            ty.location.clone(),
                        );
                        log::warn!("{diagnostic}");
                        report.diagnostics.push(diagnostic);
                    }
                }
                Err(GeneratorError::Cancelled) => return Err(GeneratorError::Cancelled),
                Err(err @ GeneratorError::UnsupportedTarget { .. }) => {
                    let diagnostic = Diagnostic::new(
                        DiagnosticId::UnsupportedTarget,
                        err.to_string(),
                        ty.location.clone(),
                    );
                    log::warn!("{diagnostic}");
                    report.diagnostics.push(diagnostic);
                }
                Err(err) => {
                    log::warn!("Generation failed for {}: {err}", ty.name);
                    report.diagnostics.push(Diagnostic::new(
                        DiagnosticId::GenerationFailed,
                        format!("Generation failed for {}: {err}", ty.name),
                        ty.location.clone(),
                    ));
                }
            }
        }

        Ok(report)
    }

    fn trigger<'t>(&self, ty: &'t TypeSymbol) -> Option<&'t AttributeData> {
        let markers = &self.config.markers;
        ty.attributes
            .iter()
            .find(|a| matches_marker(a, &markers.auto_interface, markers.namespace.as_deref()))
    }

    fn name_option(
        &self,
        ty: &TypeSymbol,
        trigger: &AttributeData,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<String> {
        match trigger.named_argument(NAME_OPTION)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(name) if is_identifier(name.trim()) => {
                Some(name.trim().to_string())
            }
            other => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticId::InvalidMarkerOption,
                    format!(
                        "{other} is not a valid interface name for {}; using the default",
                        ty.name
                    ),
                    ty.location.clone(),
                ));
                None
            }
        }
    }

    fn accessibility_option(
        &self,
        ty: &TypeSymbol,
        trigger: &AttributeData,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> InterfaceAccessibility {
        let Some(value) = trigger.named_argument(ACCESSIBILITY_OPTION) else {
            return InterfaceAccessibility::default();
        };
        InterfaceAccessibility::from_option(value).unwrap_or_else(|| {
            diagnostics.push(Diagnostic::new(
                DiagnosticId::InvalidMarkerOption,
                format!("{value} is not a known interface accessibility; using Public"),
                ty.location.clone(),
            ));
            InterfaceAccessibility::default()
        })
    }

    fn base_interfaces(&self, ty: &TypeSymbol, diagnostics: &mut Vec<Diagnostic>) -> Vec<String> {
        let markers = &self.config.markers;
        let mut bases = Vec::new();

        for attribute in ty
            .attributes
            .iter()
            .filter(|a| matches_marker(a, &markers.implements, markers.namespace.as_deref()))
        {
            let before = bases.len();
            bases.extend(
                attribute
                    .type_arguments
                    .iter()
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
            if bases.len() == before {
                diagnostics.push(Diagnostic::new(
                    DiagnosticId::MissingBaseInterface,
                    format!(
                        "{} marker on {} has no type argument; no base interface added",
                        markers.implements, ty.name
                    ),
                    ty.location.clone(),
                ));
            }
        }

        bases
    }

    fn check_constraints(
        &self,
        ty: &TypeSymbol,
        descriptor: &TypeDescriptor,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let type_generics = descriptor
            .generics
            .iter()
            .map(|g| (descriptor.name.as_str(), g, ty.location.as_ref()));
        let method_generics = descriptor.members.iter().flat_map(|m| match m {
            MemberDescriptor::Method(method) => {
                let location = method.location.as_ref().or(ty.location.as_ref());
                method
                    .generics
                    .iter()
                    .map(|g| (method.name.as_str(), g, location))
                    .collect::<Vec<_>>()
            }
            MemberDescriptor::Property(_) => Vec::new(),
        });

        for (owner, generic, location) in type_generics.chain(method_generics) {
            if generic.is_expressible() {
                continue;
            }
            let constraints: Vec<_> = generic.constraints.iter().map(|c| c.as_text()).collect();
            diagnostics.push(Diagnostic::new(
                DiagnosticId::InexpressibleConstraint,
                format!(
                    "constraints of {} on {owner} cannot be combined ({}); clause omitted",
                    generic.name,
                    constraints.join(", ")
                ),
                location.cloned(),
            ));
        }
    }
}
