//! Cell rendering for JSON values.

use serde_json::Value;

/// Render a JSON value as display text for a single cell.
///
/// Strings are shown verbatim without quotes, numbers and booleans as their
/// JSON literal, `null` as an empty cell. Arrays and objects are rendered as
/// compact JSON text. Total over all values.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(render_value(&json!(null)), "");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(false)), "false");
        assert_eq!(render_value(&json!(42)), "42");
        assert_eq!(render_value(&json!(-1.5)), "-1.5");
        assert_eq!(render_value(&json!("Ann")), "Ann");
        assert_eq!(render_value(&json!("")), "");
    }

    #[test]
    fn test_strings_are_not_quoted_or_escaped() {
        assert_eq!(render_value(&json!("say \"hi\"\n")), "say \"hi\"\n");
    }

    #[test]
    fn test_composites_render_as_compact_json() {
        assert_eq!(render_value(&json!([1, "a", null])), r#"[1,"a",null]"#);
        assert_eq!(
            render_value(&json!({"b": {"c": [true]}, "a": 1})),
            r#"{"b":{"c":[true]},"a":1}"#
        );
        assert_eq!(render_value(&json!({})), "{}");
        assert_eq!(render_value(&json!([])), "[]");
    }
}
