//! Minimal JavaScript expression tree and pretty-printer
//!
//! Output style: two-space indentation, single-quoted strings, unquoted
//! identifier keys, trailing commas on multi-line literals.

use serde_json::Value;

const INDENT: &str = "  ";

/// A JavaScript expression as emitted into the configuration file
#[derive(Debug, Clone, PartialEq)]
pub enum JsExpr {
    /// A plain JSON value
    Value(Value),
    /// A regular expression literal, stored as its source
    Regex(String),
    /// Code inserted verbatim, e.g. `path.resolve(__dirname, 'dist')`
    Raw(String),
    Object(Vec<(String, JsExpr)>),
    Array(Vec<JsExpr>),
    /// `new Class(args...)`
    New { class: String, args: Vec<JsExpr> },
}

impl JsExpr {
    /// Convert a JSON value into a tree whose objects and arrays can be amended
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => JsExpr::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), JsExpr::from_value(v)))
                    .collect(),
            ),
            Value::Array(items) => JsExpr::Array(items.iter().map(JsExpr::from_value).collect()),
            other => JsExpr::Value(other.clone()),
        }
    }

    /// Set `expr` at a key path inside an object tree, replacing non-object
    /// intermediates. Does nothing if `self` is not an object.
    pub fn set_path(&mut self, keys: &[&str], expr: JsExpr) {
        let JsExpr::Object(entries) = self else {
            return;
        };
        let Some((first, rest)) = keys.split_first() else {
            return;
        };

        let index = match entries.iter().position(|(k, _)| k == first) {
            Some(index) => index,
            None => {
                entries.push((first.to_string(), JsExpr::Object(Vec::new())));
                entries.len() - 1
            }
        };

        let slot = &mut entries[index].1;
        if rest.is_empty() {
            *slot = expr;
        } else {
            if !matches!(slot, JsExpr::Object(_)) {
                *slot = JsExpr::Object(Vec::new());
            }
            slot.set_path(rest, expr);
        }
    }

    /// Render the expression starting at the given indentation depth
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write(depth, &mut out);
        out
    }

    fn write(&self, depth: usize, out: &mut String) {
        match self {
            JsExpr::Value(Value::Null) => out.push_str("null"),
            JsExpr::Value(Value::Bool(b)) => out.push_str(if *b { "true" } else { "false" }),
            JsExpr::Value(Value::Number(n)) => out.push_str(&n.to_string()),
            JsExpr::Value(Value::String(s)) => write_string(s, out),
            JsExpr::Value(other) => JsExpr::from_value(other).write(depth, out),
            JsExpr::Regex(source) => {
                out.push('/');
                out.push_str(&escape_regex(source));
                out.push('/');
            }
            JsExpr::Raw(code) => out.push_str(code),
            JsExpr::Object(entries) => {
                if entries.is_empty() {
                    out.push_str("{}");
                    return;
                }
                out.push_str("{\n");
                for (key, value) in entries {
                    push_indent(depth + 1, out);
                    write_key(key, out);
                    out.push_str(": ");
                    value.write(depth + 1, out);
                    out.push_str(",\n");
                }
                push_indent(depth, out);
                out.push('}');
            }
            JsExpr::Array(items) => {
                if items.is_empty() {
                    out.push_str("[]");
                    return;
                }
                out.push_str("[\n");
                for item in items {
                    push_indent(depth + 1, out);
                    item.write(depth + 1, out);
                    out.push_str(",\n");
                }
                push_indent(depth, out);
                out.push(']');
            }
            JsExpr::New { class, args } => {
                out.push_str("new ");
                out.push_str(class);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.write(depth, out);
                }
                out.push(')');
            }
        }
    }
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Whether `key` can be written without quotes
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_key(key: &str, out: &mut String) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        write_string(key, out);
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
}

/// Escape bare forward slashes so the source fits in a `/.../` literal
fn escape_regex(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut escaped = false;
    for c in source.chars() {
        if c == '/' && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    // A dangling backslash would escape the closing slash
    if escaped {
        out.push('\\');
    }
    out
}
