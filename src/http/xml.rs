//! XML serialization module
//!
//! Coerces a generic JSON value into a flat XML element tree prefixed
//! with a UTF-8 prolog. Objects emit one element per key, arrays repeat
//! an `<item>` element (or the owning key for nested arrays), scalars
//! emit escaped text. This mirrors a key/value-tree coercion rather than
//! a schema-aware mapping.

use serde_json::Value;

/// Prolog emitted ahead of every XML document.
pub const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Render a produced value as a full XML document.
pub fn to_xml_document(value: &Value) -> String {
    let mut out = String::from(XML_PROLOG);
    write_value(&mut out, value, "item");
    out
}

/// Append the XML rendering of `value`; `name` wraps scalars and array
/// elements that have no key of their own.
fn write_value(out: &mut String, value: &Value, name: &str) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                write_element(out, key, child);
            }
        }
        Value::Array(items) => {
            for item in items {
                write_element(out, name, item);
            }
        }
        scalar => out.push_str(&escape_text(&scalar_text(scalar))),
    }
}

fn write_element(out: &mut String, name: &str, value: &Value) {
    match value {
        Value::Null => {
            out.push('<');
            out.push_str(name);
            out.push_str("/>");
        }
        _ => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            write_value(out, value, name);
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_emits_one_element_per_key() {
        let doc = to_xml_document(&json!({"key": "a", "value": "b"}));
        assert_eq!(doc, format!("{XML_PROLOG}<key>a</key><value>b</value>"));
    }

    #[test]
    fn test_nested_object() {
        let doc = to_xml_document(&json!({"note": {"title": "first", "pinned": true}}));
        assert_eq!(
            doc,
            format!("{XML_PROLOG}<note><title>first</title><pinned>true</pinned></note>")
        );
    }

    #[test]
    fn test_array_repeats_owning_key() {
        let doc = to_xml_document(&json!({"ids": [3, 4, 5]}));
        assert_eq!(
            doc,
            format!("{XML_PROLOG}<ids>3</ids><ids>4</ids><ids>5</ids>")
        );
    }

    #[test]
    fn test_scalar_root_is_escaped_text() {
        let doc = to_xml_document(&json!("a<b&c"));
        assert_eq!(doc, format!("{XML_PROLOG}a&lt;b&amp;c"));
    }

    #[test]
    fn test_null_value_is_empty_element() {
        let doc = to_xml_document(&json!({"gone": null}));
        assert_eq!(doc, format!("{XML_PROLOG}<gone/>"));
    }
}
