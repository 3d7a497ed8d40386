use serde_json::Value as JsonValue;

/// Parse model output that is supposed to be a JSON object but may arrive
/// wrapped in prose. Tries a direct parse first, then the substring between
/// the first `{` and the last `}`. Returns `None` when both fail.
pub fn coerce_json_object(text: &str) -> Option<JsonValue> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_clean_json() {
        let value = coerce_json_object(r#"{"a": 1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn recovers_object_wrapped_in_prose() {
        let value =
            coerce_json_object(r#"Here is the result: {"a": {"b": 2}} Thanks."#).unwrap();
        assert_eq!(value, json!({"a": {"b": 2}}));
    }

    #[test]
    fn rejects_text_without_an_object() {
        assert!(coerce_json_object("no json here at all").is_none());
        assert!(coerce_json_object("} backwards {").is_none());
        assert!(coerce_json_object("{ still broken").is_none());
    }
}
