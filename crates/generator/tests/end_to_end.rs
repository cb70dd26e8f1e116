use autoface_generator::{
    CancellationToken, DiagnosticId, GenerationReport, GeneratorConfig, InterfaceGenerator,
};
use autoface_protocol::CompilationUnit;
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn generate(unit: serde_json::Value, config: GeneratorConfig) -> GenerationReport {
    init_logging();
    let unit = CompilationUnit::from_json(&unit.to_string()).expect("fixture parses");
    let generator = InterfaceGenerator::new(config).expect("valid config");
    generator
        .generate_all(&unit, &CancellationToken::new())
        .expect("generation succeeds")
}

fn config() -> GeneratorConfig {
    GeneratorConfig {
        source_root: Some("/work".into()),
        ..GeneratorConfig::default().with_tool("autoface", "1.0.0")
    }
}

fn service_fixture() -> serde_json::Value {
    json!({
        "types": [{
            "name": "MyClass",
            "kind": "class",
            "containing_namespace": "Demo.Services",
            "attributes": [
                { "name": "AutoInterfaceAttribute", "namespace": "Autoface" },
                { "name": "Implements", "namespace": "Autoface", "type_arguments": ["System.IDisposable"] }
            ],
            "usings": ["using System;", "using System.Collections.Generic;", "using System;"],
            "documentation": "/// <summary>\n/// Greets people.\n/// </summary>",
            "location": { "path": "/work/src/MyClass.cs", "line": 5 },
            "members": [
                {
                    "kind": "property",
                    "name": "Message",
                    "type_name": "string",
                    "declared_accessibility": "public",
                    "getter": { "kind": "get" },
                    "setter": { "kind": "set" },
                    "documentation": "    /// <summary>The message.</summary>",
                    "location": { "path": "/work/src/MyClass.cs", "line": 8 }
                },
                {
                    "kind": "property",
                    "name": "Count",
                    "type_name": "int",
                    "declared_accessibility": "public",
                    "getter": { "kind": "get" },
                    "setter": {
                        "kind": "set",
                        "attributes": [{ "name": "ExcludeFromInterface", "syntax": "[ExcludeFromInterface]" }]
                    }
                },
                {
                    "kind": "method",
                    "name": "Add",
                    "return_type": "int",
                    "declared_accessibility": "public",
                    "parameters": [
                        { "name": "a", "type_name": "int" },
                        { "name": "b", "type_name": "int" }
                    ],
                    "location": { "path": "/work/src/MyClass.cs", "line": 12 }
                },
                {
                    "kind": "method",
                    "name": "Scale",
                    "return_type": "long",
                    "declared_accessibility": "public",
                    "parameters": [
                        { "name": "value", "type_name": "long", "default_value": { "kind": "int64", "value": 5 } },
                        { "name": "label", "type_name": "string?", "default_value": { "kind": "null" } }
                    ]
                },
                {
                    "kind": "method",
                    "name": "Secret",
                    "return_type": "void",
                    "declared_accessibility": "public",
                    "attributes": [{
                        "name": "ExcludeFromInterfaceAttribute",
                        "namespace": "Autoface",
                        "syntax": "[ExcludeFromInterface]"
                    }]
                },
                {
                    "kind": "method",
                    "name": "Demo.Services.IMyClass.Reset",
                    "return_type": "void",
                    "declared_accessibility": "private",
                    "explicit_interface": "Demo.Services.IMyClass"
                },
                { "kind": "method", "name": "Dispose", "return_type": "void", "declared_accessibility": "public" },
                { "kind": "method", "name": "Helper", "return_type": "void", "declared_accessibility": "private" },
                { "kind": "field", "name": "_count" }
            ]
        }]
    })
}

#[test]
fn annotated_service_end_to_end() {
    let report = generate(service_fixture(), config());

    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    assert_eq!(report.artifacts.len(), 1);
    assert_eq!(report.artifacts[0].file_name, "Demo.Services.IMyClass.g.cs");

    let expected = r#"// <auto-generated>
// This code was generated by a tool.
// </auto-generated>

#nullable enable

using System;
using System.Collections.Generic;

namespace Demo.Services;

/// <summary>
/// Greets people.
/// </summary>
#line 5 "src/MyClass.cs"
[System.CodeDom.Compiler.GeneratedCode("autoface", "1.0.0")]
public partial interface IMyClass: System.IDisposable
{
    /// <summary>The message.</summary>
    #line 8 "src/MyClass.cs"
    string Message { get; set; }

    #line default
    int Count { get; }

    #line 12 "src/MyClass.cs"
    int Add(int a, int b);

    #line default
    long Scale(long value = 5L, string? label = default);

    void Reset();

    void Dispose();
}
#line default
"#;
    assert_eq!(report.artifacts[0].text, expected);
}

#[test]
fn renamed_generic_interface_without_accessibility() {
    let fixture = json!({
        "types": [{
            "name": "Repository",
            "containing_namespace": "Demo.Data",
            "nullable_context": "disabled",
            "attributes": [{
                "name": "Autoface.AutoInterface",
                "named_arguments": { "Name": "IStore", "Accessibility": "None" }
            }],
            "type_parameters": [{
                "name": "T",
                "has_reference_type_constraint": true,
                "has_constructor_constraint": true,
                "constraint_types": ["IEntity"]
            }],
            "members": [
                {
                    "kind": "method",
                    "name": "Find",
                    "return_type": "T?",
                    "declared_accessibility": "public",
                    "parameters": [{ "name": "id", "type_name": "int" }]
                },
                {
                    "kind": "method",
                    "name": "Get",
                    "return_type": "TOut",
                    "declared_accessibility": "public",
                    "type_parameters": [{ "name": "TOut", "has_not_null_constraint": true }],
                    "parameters": [{ "name": "event", "type_name": "string" }]
                }
            ]
        }]
    });

    let report = generate(fixture, config());
    assert_eq!(report.artifacts[0].file_name, "Demo.Data.IStore`1.g.cs");

    let expected = r#"// <auto-generated>
// This code was generated by a tool.
// </auto-generated>

#nullable disable

namespace Demo.Data;

[System.CodeDom.Compiler.GeneratedCode("autoface", "1.0.0")]
partial interface IStore<T> where T: class, IEntity, new()
{
    T? Find(int id);

    TOut Get<TOut>(string @event) where TOut: notnull;
}
#line default
"#;
    assert_eq!(report.artifacts[0].text, expected);
}

#[test]
fn compact_output_for_the_canonical_example() {
    let fixture = json!({
        "types": [{
            "name": "MyClass",
            "containing_namespace": "App",
            "attributes": [{ "name": "AutoInterface" }],
            "members": [
                {
                    "kind": "property",
                    "name": "Message",
                    "type_name": "string",
                    "declared_accessibility": "public",
                    "getter": { "kind": "get" },
                    "setter": { "kind": "set" }
                },
                {
                    "kind": "method",
                    "name": "Add",
                    "return_type": "int",
                    "declared_accessibility": "public",
                    "parameters": [
                        { "name": "a", "type_name": "int" },
                        { "name": "b", "type_name": "int" }
                    ]
                }
            ]
        }]
    });

    let config = GeneratorConfig::compact().with_tool("autoface", "1.0.0");
    let report = generate(fixture, config);

    assert_eq!(
        report.artifacts[0].text,
        "#nullable enable\n\nnamespace App;\n\n[System.CodeDom.Compiler.GeneratedCode(\"autoface\", \"1.0.0\")]\npublic partial interface IMyClass\n{\n    string Message { get; set; }\n\n    int Add(int a, int b);\n}\n"
    );
}

#[test]
fn mixed_unit_reports_problems_without_stopping() {
    let fixture = json!({
        "types": [
            {
                "name": "Point",
                "kind": "struct",
                "containing_namespace": "Geo",
                "attributes": [{ "name": "AutoInterface" }]
            },
            {
                "name": "Shape",
                "containing_namespace": "Geo",
                "attributes": [
                    { "name": "AutoInterface", "named_arguments": { "Accessibility": "Protected" } },
                    { "name": "Implements" }
                ],
                "members": [
                    { "kind": "method", "name": "Area", "return_type": "double", "declared_accessibility": "public" }
                ]
            },
            { "name": "Plain", "containing_namespace": "Geo" }
        ]
    });

    let report = generate(fixture, GeneratorConfig::compact());
    assert_eq!(report.artifacts.len(), 1);
    assert_eq!(report.artifacts[0].file_name, "Geo.IShape.g.cs");
    assert!(report.artifacts[0]
        .text
        .contains("public partial interface IShape\n{\n    double Area();\n}\n"));

    let ids: Vec<_> = report.diagnostics.iter().map(|d| d.id).collect();
    assert_eq!(
        ids,
        [
            DiagnosticId::UnsupportedTarget,
            DiagnosticId::InvalidMarkerOption,
            DiagnosticId::MissingBaseInterface,
        ]
    );
}

#[test]
fn custom_marker_names() {
    let mut config = GeneratorConfig::compact();
    config.markers.namespace = Some("Acme".to_string());
    config.markers.auto_interface = "GenerateContract".to_string();
    config.markers.exclude = "NotInContract".to_string();

    let fixture = json!({
        "types": [
            {
                "name": "Billing",
                "attributes": [{ "name": "GenerateContractAttribute", "namespace": "Acme" }],
                "members": [
                    { "kind": "method", "name": "Charge", "return_type": "void", "declared_accessibility": "public" },
                    {
                        "kind": "method",
                        "name": "Audit",
                        "return_type": "void",
                        "declared_accessibility": "public",
                        "attributes": [{ "name": "NotInContract", "namespace": "Acme" }]
                    }
                ]
            },
            {
                "name": "Ignored",
                "attributes": [{ "name": "AutoInterface", "namespace": "Autoface" }]
            }
        ]
    });

    let report = generate(fixture, config);
    assert_eq!(report.artifacts.len(), 1);
    assert_eq!(report.artifacts[0].file_name, "IBilling.g.cs");
    assert!(report.artifacts[0].text.contains("    void Charge();\n"));
    assert!(!report.artifacts[0].text.contains("Audit"));
}
