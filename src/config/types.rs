//! Property store data types.

use serde::Serialize;
use std::collections::BTreeMap;

/// A single configuration value.
///
/// Values parsed from the config file keep their shape; flags always
/// produce `Text` or `Flag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Flag(bool),
    List(Vec<String>),
    Table(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Convert a parsed JSON5 document node.
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => PropertyValue::Text(String::new()),
            Value::Bool(b) => PropertyValue::Flag(b),
            Value::Number(n) => PropertyValue::Text(n.to_string()),
            Value::String(s) => PropertyValue::Text(s),
            Value::Array(items) => {
                PropertyValue::List(items.into_iter().map(render_scalar).collect())
            }
            Value::Object(map) => PropertyValue::Table(
                map.into_iter()
                    .map(|(k, v)| (k, PropertyValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&BTreeMap<String, PropertyValue>> {
        match self {
            PropertyValue::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Flatten into a string map, joining nested keys with `.`.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        if let PropertyValue::Table(table) = self {
            flatten_into(&mut out, None, table);
        }
        out
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Flag(b)
    }
}

fn render_scalar(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

fn flatten_into(
    out: &mut BTreeMap<String, String>,
    prefix: Option<&str>,
    table: &BTreeMap<String, PropertyValue>,
) {
    for (key, value) in table {
        let key = match prefix {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        match value {
            PropertyValue::Text(s) => {
                out.insert(key, s.clone());
            }
            PropertyValue::Flag(b) => {
                out.insert(key, b.to_string());
            }
            PropertyValue::List(items) => {
                out.insert(key, items.join(","));
            }
            PropertyValue::Table(nested) => flatten_into(out, Some(&key), nested),
        }
    }
}

/// Merged option store.
///
/// Filled by the loader, rewritten by the validators during startup and
/// read-only once handed to the application inside
/// [`ResolvedConfig`](crate::service::ResolvedConfig).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, PropertyValue>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// String value of `name`; empty if absent or not a string.
    pub fn get(&self, name: &str) -> &str {
        self.values
            .get(name)
            .and_then(PropertyValue::as_text)
            .unwrap_or_default()
    }

    /// Whether a boolean option is switched on.
    pub fn is_enabled(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(PropertyValue::Flag(b)) => *b,
            Some(PropertyValue::Text(s)) => s == "true",
            _ => false,
        }
    }

    /// Store `value` under `name`, replacing any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<PropertyValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn value(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, PropertyValue>> for Properties {
    fn from(values: BTreeMap<String, PropertyValue>) -> Self {
        Self { values }
    }
}
