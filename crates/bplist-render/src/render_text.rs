use bplist_types::Value;

const INDENT: &str = "    ";

/// Text renderer: an indented, OpenStep-flavoured tree for reading.
///
/// Unlike JSON output this keeps every dictionary pair in plist order,
/// including duplicates and non-string keys.
///
/// Example output:
///
/// ```text
/// {
///     name = cat;
///     "full name" = "Felis catus";
///     tags = (
///         1,
///         <null>
///     );
///     photo = <dead00>;
///     seen = <date 0.0>;
/// }
/// ```
///
/// Strings made only of letters, digits and `_$./:-` are written bare;
/// anything else is quoted with `\"`, `\\`, `\n` and `\t` escapes, and other
/// control characters as `\Uxxxx`.
pub struct TextRenderer;

impl TextRenderer {
    pub fn render(value: &Value) -> String {
        let mut out = String::new();
        write_value(&mut out, value, 0);
        out
    }
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("<null>"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Real(r) => out.push_str(&format!("{r:?}")),
        Value::Date(secs) => out.push_str(&format!("<date {secs:?}>")),
        Value::Data(bytes) => {
            out.push('<');
            out.push_str(&hex::encode(bytes));
            out.push('>');
        }
        Value::String(s) => write_string(out, s),
        Value::Array(items) => write_array(out, items, depth),
        Value::Dictionary(pairs) => write_dictionary(out, pairs, depth),
    }
}

fn write_array(out: &mut String, items: &[Value], depth: usize) {
    if items.is_empty() {
        out.push_str("()");
        return;
    }

    out.push_str("(\n");
    for (i, item) in items.iter().enumerate() {
        indent(out, depth + 1);
        write_value(out, item, depth + 1);
        if i + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    indent(out, depth);
    out.push(')');
}

fn write_dictionary(out: &mut String, pairs: &[(Value, Value)], depth: usize) {
    if pairs.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for (key, value) in pairs {
        indent(out, depth + 1);
        write_value(out, key, depth + 1);
        out.push_str(" = ");
        write_value(out, value, depth + 1);
        out.push_str(";\n");
    }
    indent(out, depth);
    out.push('}');
}

fn write_string(out: &mut String, s: &str) {
    if is_bare(s) {
        out.push_str(s);
        return;
    }

    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\U{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn is_bare(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/' | ':' | '-'))
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
