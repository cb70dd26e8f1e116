//! # Autoface Generator
//!
//! Derives C# interface declarations from classes annotated with an
//! `[AutoInterface]` marker.
//!
//! ## Philosophy
//!
//! The host compiler owns parsing and symbol resolution. This crate only
//! sees the resolved symbols it is handed and turns them into source text:
//! - Output is a pure function of the symbol shape and the configuration
//! - Layout (indentation, blank lines, spacing) is owned by one builder
//! - Anything C# could not accept is dropped and reported, never emitted
//!
//! ## Architecture
//!
//! ```text
//! TypeSymbol (from the host)
//!     │
//!     ├──> Driver: marker options, Implements<T> bases, generic constraints
//!     │
//!     ├──> Member Filter → MemberDescriptor[]
//!     │    ├─> public instance methods and properties
//!     │    ├─> explicit implementations of the generated interface
//!     │    └─> exclusion markers on members and accessors
//!     │
//!     └──> Interface Assembler
//!          ├─> preamble, #nullable, usings, namespace
//!          ├─> header (docs, #line, [GeneratedCode], bases, constraints)
//!          └─> Signature Formatter per member, through the Text Builder
//! ```
//!
//! ## Example
//!
//! ```rust
//! use autoface_generator::{CancellationToken, GeneratorConfig, InterfaceGenerator};
//! use autoface_protocol::{
//!     AttributeData, MethodSymbol, ParameterSymbol, PropertySymbol, TypeSymbol,
//! };
//!
//! let class = TypeSymbol::class("MyClass", Some("App"))
//!     .with_attribute(AttributeData::new("AutoInterface"))
//!     .with_member(PropertySymbol::public("Message", "string"))
//!     .with_member(
//!         MethodSymbol::public("Add", "int")
//!             .with_parameter(ParameterSymbol::new("a", "int"))
//!             .with_parameter(ParameterSymbol::new("b", "int")),
//!     );
//!
//! let generator = InterfaceGenerator::new(GeneratorConfig::compact()).unwrap();
//! let output = generator.generate(&class, &CancellationToken::new()).unwrap();
//!
//! assert_eq!(output.artifact.file_name, "App.IMyClass.g.cs");
//! assert!(output.artifact.text.contains("int Add(int a, int b);"));
//! ```

mod assembler;
mod cancel;
mod config;
mod diagnostics;
mod driver;
mod error;
mod filter;
mod formatter;
mod keywords;
mod literal;
mod text_builder;
mod types;

pub use assembler::InterfaceAssembler;
pub use cancel::CancellationToken;
pub use config::{GeneratorConfig, MarkerNames, ToolStamp};
pub use diagnostics::{Diagnostic, DiagnosticId, Severity};
pub use driver::{Description, GenerationOutput, GenerationReport, InterfaceGenerator};
pub use error::{GeneratorError, Result};
pub use filter::MemberFilter;
pub use formatter::SignatureFormatter;
pub use keywords::escape_identifier;
pub use literal::render as render_literal;
pub use text_builder::TextBuilder;
pub use types::{
    AccessorDescriptor, Constraint, GeneratedArtifact, GenericParameter, MemberDescriptor,
    MethodDescriptor, ParameterDescriptor, PropertyDescriptor, TypeDescriptor,
};
