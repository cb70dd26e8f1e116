use std::borrow::Cow;

/// Reserved C# keywords. Contextual keywords (`var`, `record`, `init`, ...)
/// are legal identifiers and stay unescaped.
const RESERVED: &[&str] = &[
    "__arglist", "__makeref", "__reftype", "__refvalue", "abstract", "as", "base", "bool",
    "break", "byte", "case", "catch", "char", "checked", "class", "const", "continue",
    "decimal", "default", "delegate", "do", "double", "else", "enum", "event", "explicit",
    "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace",
    "new", "null", "object", "operator", "out", "override", "params", "private", "protected",
    "public", "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc",
    "static", "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint",
    "ulong", "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED.binary_search(&name).is_ok()
}

/// Prefix reserved keywords with `@`.
pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if is_reserved(name) {
        Cow::Owned(format!("@{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Identifier without its verbatim `@` prefix.
pub fn unescape_identifier(name: &str) -> &str {
    name.strip_prefix('@').unwrap_or(name)
}
