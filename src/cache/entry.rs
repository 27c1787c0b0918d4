use serde_json::Value;

/// Content of one cache file.
///
/// Files holding valid, non-empty JSON come back as [`CacheEntry::Json`];
/// everything else is returned as the raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    Text(String),
    Json(Value),
}

impl CacheEntry {
    /// Interprets file contents the way the cache reader does.
    pub fn from_contents(contents: String) -> Self {
        match serde_json::from_str::<Value>(&contents) {
            Ok(value) if is_truthy(&value) => Self::Json(value),
            _ => Self::Text(contents),
        }
    }

    /// Text written to disk for this entry. JSON strings are written raw.
    pub fn to_contents(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Text(text) | Self::Json(Value::String(text)) => Ok(text.clone()),
            Self::Json(value) => serde_json::to_string(value),
        }
    }

    /// False for empty text and for `null`, `false`, `0`, `""`, `[]` and `{}`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Json(value) => is_truthy(value),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }
}

impl From<String> for CacheEntry {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for CacheEntry {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for CacheEntry {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_contents_are_parsed() {
        let entry = CacheEntry::from_contents(r#"{"machineToken": "abc"}"#.to_string());
        assert_eq!(entry, CacheEntry::Json(json!({"machineToken": "abc"})));
    }

    #[test]
    fn test_plain_text_stays_text() {
        let entry = CacheEntry::from_contents("not json at all".to_string());
        assert_eq!(entry, CacheEntry::Text("not json at all".into()));
    }

    #[test]
    fn test_empty_json_stays_text() {
        assert_eq!(
            CacheEntry::from_contents("{}".to_string()),
            CacheEntry::Text("{}".into())
        );
        assert_eq!(
            CacheEntry::from_contents("null".to_string()),
            CacheEntry::Text("null".into())
        );
    }

    #[test]
    fn test_json_strings_are_written_raw() {
        let entry = CacheEntry::Json(json!("token-value"));
        assert_eq!(entry.to_contents().unwrap(), "token-value");

        let entry = CacheEntry::Json(json!({"a": [1, 2]}));
        assert_eq!(entry.to_contents().unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_truthiness() {
        assert!(!CacheEntry::Text(String::new()).is_truthy());
        assert!(CacheEntry::Text("{}".into()).is_truthy());
        assert!(!CacheEntry::Json(json!(0)).is_truthy());
        assert!(!CacheEntry::Json(json!([])).is_truthy());
        assert!(CacheEntry::Json(json!({"k": null})).is_truthy());
    }
}
