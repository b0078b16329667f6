//! The three-valued value model underlying schemas, plans, and state.
//!
//! Every attribute position holds a [`Value`]: a known scalar or container,
//! `Null`, or `Unknown`. `Unknown` is the planning-time placeholder for a
//! computed attribute the remote has not confirmed yet; it propagates until
//! the host resolves it. Null, empty list, and unknown are three distinct
//! things and must never be conflated.

use std::collections::BTreeMap;

/// A three-valued attribute tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicitly absent.
    Null,
    /// Not yet known; resolved by the host during planning.
    Unknown,
    /// A known string.
    String(String),
    /// A known 64-bit integer.
    Int(i64),
    /// A known 64-bit float.
    Float(f64),
    /// A known boolean.
    Bool(bool),
    /// An ordered sequence. Equality is element-wise positional.
    List(Vec<Value>),
    /// An unordered string-keyed mapping, compared by key.
    Map(BTreeMap<String, Value>),
    /// A typed record with a fixed attribute set.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Build a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Build a list of string values.
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Self::String(s.into())).collect())
    }

    /// Build a string value from an option, mapping `None` to `Null`.
    pub fn opt_string(s: Option<String>) -> Self {
        match s {
            Some(s) => Self::String(s),
            None => Self::Null,
        }
    }

    /// Build an object from attribute pairs.
    pub fn object<I, S>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Self::Object(attrs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Whether this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value is `Unknown`.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Whether this value is neither `Null` nor `Unknown`.
    pub fn is_known(&self) -> bool {
        !self.is_null() && !self.is_unknown()
    }

    /// View as a string, if known.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// View as an integer, if known.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// View as a float, if known. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// View as a bool, if known.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// View as a list, if known.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// View as an object's attribute map, if known.
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// View as a mapping, if known.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Fetch an attribute of an object. Missing attributes read as `Null`.
    pub fn get(&self, name: &str) -> &Value {
        static NULL: Value = Value::Null;
        match self {
            Self::Object(attrs) | Self::Map(attrs) => attrs.get(name).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    /// Set an attribute on an object, returning the updated value.
    ///
    /// Non-object values are replaced by a fresh object holding the single
    /// attribute.
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        match &mut self {
            Self::Object(attrs) => {
                attrs.insert(name.into(), value);
                self
            }
            _ => Value::object([(name.into(), value)]),
        }
    }

    /// Collect a list of strings, skipping non-string elements.
    ///
    /// Returns `None` if the value is null, unknown, or not a list.
    pub fn string_items(&self) -> Option<Vec<String>> {
        self.as_list()
            .map(|items| items.iter().filter_map(|v| v.as_str().map(String::from)).collect())
    }

    /// Whether any position in this tree is `Unknown`.
    pub fn contains_unknown(&self) -> bool {
        match self {
            Self::Unknown => true,
            Self::List(items) => items.iter().any(Value::contains_unknown),
            Self::Map(entries) | Self::Object(entries) => {
                entries.values().any(Value::contains_unknown)
            }
            _ => false,
        }
    }

    /// Compare two values, treating `Unknown` on either side as equal.
    ///
    /// Sequences compare positionally; mappings and objects compare by key,
    /// with a key absent on one side equal only to `Null` on the other.
    pub fn eq_ignoring_unknown(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Unknown, _) | (_, Self::Unknown) => true,
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| x.eq_ignoring_unknown(y))
            }
            (Self::Map(a), Self::Map(b)) | (Self::Object(a), Self::Object(b)) => {
                let keys: std::collections::BTreeSet<&String> =
                    a.keys().chain(b.keys()).collect();
                keys.into_iter().all(|k| {
                    let x = a.get(k).unwrap_or(&Value::Null);
                    let y = b.get(k).unwrap_or(&Value::Null);
                    x.eq_ignoring_unknown(y)
                })
            }
            _ => self == other,
        }
    }

    /// Convert a JSON document into a value tree.
    ///
    /// JSON objects become records; there is no unknown in JSON, so the result
    /// never contains `Unknown`. JSON arrays of objects keep their order.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert to JSON. `Unknown` collapses to JSON null.
    ///
    /// Callers that must preserve unknown (the plan path) work on the value
    /// tree directly; JSON is only produced once all positions are resolved
    /// or deliberately stripped.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null | Self::Unknown => serde_json::Value::Null,
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Int(i) => serde_json::Value::Number((*i).into()),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Map(entries) | Self::Object(entries) => serde_json::Value::Object(
                entries.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_three_values_are_distinct() {
        assert_ne!(Value::Null, Value::Unknown);
        assert_ne!(Value::Null, Value::List(vec![]));
        assert_ne!(Value::Unknown, Value::List(vec![]));
    }

    #[test]
    fn test_eq_ignoring_unknown() {
        let a = Value::object([("id", Value::Unknown), ("name", Value::string("p"))]);
        let b = Value::object([("id", Value::string("p-1")), ("name", Value::string("p"))]);
        assert!(a.eq_ignoring_unknown(&b));

        let c = Value::object([("id", Value::string("p-2")), ("name", Value::string("p"))]);
        assert!(!b.eq_ignoring_unknown(&c));
    }

    #[test]
    fn test_list_equality_is_positional() {
        let a = Value::string_list(["x", "y"]);
        let b = Value::string_list(["y", "x"]);
        assert_ne!(a, b);
        assert!(!a.eq_ignoring_unknown(&b));
    }

    #[test]
    fn test_missing_object_key_reads_as_null() {
        let obj = Value::object([("name", Value::string("p"))]);
        assert!(obj.get("description").is_null());

        // Absent key compares equal to explicit null.
        let explicit = Value::object([
            ("name", Value::string("p")),
            ("description", Value::Null),
        ]);
        assert!(obj.eq_ignoring_unknown(&explicit));
    }

    #[test]
    fn test_json_round_trip() {
        let v = Value::object([
            ("name", Value::string("proj-a")),
            ("labels", Value::string_list(["x"])),
            ("count", Value::Int(3)),
            ("enabled", Value::Bool(true)),
            ("description", Value::Null),
        ]);
        let json = v.to_json();
        assert_eq!(
            json,
            json!({
                "name": "proj-a",
                "labels": ["x"],
                "count": 3,
                "enabled": true,
                "description": null,
            })
        );
        let back = Value::from_json(&json);
        assert_eq!(back, v);
    }

    #[test]
    fn test_unknown_collapses_to_json_null() {
        let v = Value::object([("id", Value::Unknown)]);
        assert_eq!(v.to_json(), json!({"id": null}));
    }

    #[test]
    fn test_contains_unknown() {
        let v = Value::object([(
            "nested",
            Value::List(vec![Value::object([("id", Value::Unknown)])]),
        )]);
        assert!(v.contains_unknown());
        assert!(!Value::string("x").contains_unknown());
    }

    #[test]
    fn test_string_items() {
        let v = Value::string_list(["a", "b"]);
        assert_eq!(v.string_items(), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(Value::Null.string_items(), None);
    }

    #[test]
    fn test_with_sets_attribute() {
        let v = Value::object([("name", Value::string("p"))])
            .with("id", Value::string("p-1"));
        assert_eq!(v.get("id").as_str(), Some("p-1"));
        assert_eq!(v.get("name").as_str(), Some("p"));
    }
}
