use autoface_protocol::ConstantValue;

/// Render a compile-time default as C# literal text.
///
/// `null` becomes `default` so the same text works for value types.
pub fn render(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Null => "default".to_string(),
        ConstantValue::Bool(v) => v.to_string(),
        ConstantValue::Char(c) => format!("'{}'", escape_char(*c, '\'')),
        ConstantValue::String(s) => {
            let escaped: String = s.chars().map(|c| escape_char(c, '"')).collect();
            format!("\"{escaped}\"")
        }
        ConstantValue::Sbyte(v) => v.to_string(),
        ConstantValue::Byte(v) => v.to_string(),
        ConstantValue::Int16(v) => v.to_string(),
        ConstantValue::Uint16(v) => v.to_string(),
        ConstantValue::Int32(v) => v.to_string(),
        ConstantValue::Uint32(v) => format!("{v}U"),
        ConstantValue::Int64(v) => format!("{v}L"),
        ConstantValue::Uint64(v) => format!("{v}UL"),
        ConstantValue::Single(v) => render_single(*v),
        ConstantValue::Double(v) => render_double(*v),
        ConstantValue::Decimal(digits) => {
            format!("{}M", digits.trim().trim_end_matches(['m', 'M']))
        }
        ConstantValue::Raw(text) => text.trim().to_string(),
    }
}

fn render_single(v: f32) -> String {
    if v.is_nan() {
        "float.NaN".to_string()
    } else if v.is_infinite() {
        let name = if v > 0.0 { "PositiveInfinity" } else { "NegativeInfinity" };
        format!("float.{name}")
    } else {
        // Debug keeps a fractional part or exponent, never a bare integer.
        format!("{v:?}F")
    }
}

fn render_double(v: f64) -> String {
    if v.is_nan() {
        "double.NaN".to_string()
    } else if v.is_infinite() {
        let name = if v > 0.0 { "PositiveInfinity" } else { "NegativeInfinity" };
        format!("double.{name}")
    } else {
        format!("{v:?}")
    }
}

fn escape_char(c: char, quote: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\0' => "\\0".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        c if c == quote => format!("\\{c}"),
        c if c.is_control() => format!("\\u{:04X}", c as u32),
        c => c.to_string(),
    }
}
