use serde_json::Value;

/// Convert a JSON scalar to a short string. Containers and null yield an empty string.
pub fn value_to_short_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) | Value::Null => String::new(),
    }
}

/// Return the first key of `keys` that is present and non-null on `obj`.
///
/// Backend payloads are not consistent about naming (`total` vs
/// `total_price`, `months` vs `term_months`), so readers try aliases in order.
pub fn first_present<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// First alias that renders to a non-empty string.
pub fn first_string(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .map(value_to_short_string)
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_present_skips_nulls() {
        let v = json!({"total": null, "total_price": 12.5});
        assert_eq!(first_present(&v, &["total", "total_price"]), Some(&json!(12.5)));
    }

    #[test]
    fn first_string_skips_blank_values() {
        let v = json!({"name": "  ", "product_name": "Standard tier"});
        assert_eq!(first_string(&v, &["name", "product_name"]).as_deref(), Some("Standard tier"));
    }

    #[test]
    fn numbers_render_without_quotes() {
        assert_eq!(value_to_short_string(&json!(42)), "42");
        assert_eq!(value_to_short_string(&json!(null)), "");
    }
}
