//! Payload model for traced values.
//!
//! A [`Payload`] is the value an application hands to a tracing client on each
//! lifecycle event: chain inputs and outputs, retriever queries and retrieved
//! documents. It is a recursive, JSON-like tree extended with three shapes that
//! JSON lacks:
//!
//! - byte strings ([`Payload::Bytes`]), decoded lossily when serialized
//! - documents ([`Document`]), the `{page_content, metadata}` records produced
//!   by retrievers
//! - structured records ([`Payload::Record`]) exposing a dict-style export via
//!   [`StructuredExport`], and opaque values ([`Payload::Opaque`]) that are only
//!   known through their text representation
//!
//! Payloads are assumed to be acyclic. Shared `Arc` handles make cloning cheap
//! for records and opaque values, but nothing in the model guards against a
//! record whose export contains itself.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

use crate::domain::error::Result;

/// Capability of exporting a value as an ordered string-keyed mapping.
///
/// This is the typed counterpart of "has a `model_dump`/`dict` method": schema
/// validated models implement it and the truncation engine serializes their
/// export with the mapping rule.
///
/// # Examples
///
/// ```
/// use langfuse_runnable_config::{Payload, PayloadMap, StructuredExport};
///
/// #[derive(Debug)]
/// struct Query {
///     text: String,
///     top_k: i64,
/// }
///
/// impl StructuredExport for Query {
///     fn export(&self) -> PayloadMap {
///         let mut map = PayloadMap::new();
///         map.insert("text", self.text.as_str());
///         map.insert("top_k", self.top_k);
///         map
///     }
/// }
///
/// let payload = Payload::record(Query { text: "rust".into(), top_k: 4 });
/// assert_eq!(payload.type_name(), "record");
/// ```
pub trait StructuredExport: fmt::Debug + Send + Sync {
    /// Exports the record as a mapping of field name to value.
    fn export(&self) -> PayloadMap;
}

/// Values known only through their text representation.
///
/// Blanket-implemented for every `Display + Debug + Send + Sync` type.
pub trait TextRepr: fmt::Display + fmt::Debug + Send + Sync {}

impl<T> TextRepr for T where T: fmt::Display + fmt::Debug + Send + Sync {}

/// A traced value.
#[derive(Debug, Clone)]
pub enum Payload {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Sequence(Vec<Payload>),
    Mapping(PayloadMap),
    Document(Document),
    Record(Arc<dyn StructuredExport>),
    Opaque(Arc<dyn TextRepr>),
}

impl Payload {
    /// Wraps a structured record.
    pub fn record<R: StructuredExport + 'static>(record: R) -> Self {
        Self::Record(Arc::new(record))
    }

    /// Wraps a value that is only known through its `Display` output.
    pub fn opaque<T: TextRepr + 'static>(value: T) -> Self {
        Self::Opaque(Arc::new(value))
    }

    /// Wraps a byte string.
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(value.into())
    }

    /// Converts any `serde`-serializable value into a payload.
    ///
    /// Structs and maps become [`Payload::Mapping`] with field order preserved.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LangfuseError::Serialization`] if the value's
    /// `Serialize` implementation fails (e.g. a map with non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::from(serde_json::to_value(value)?))
    }

    /// Short name of the variant, used in log fields.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Document(_) => "document",
            Self::Record(_) => "record",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Returns `true` for integers and floats. Booleans are not numeric.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_mapping(&self) -> Option<&PayloadMap> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Renders the payload as JSON.
    ///
    /// Bytes are decoded lossily, records are rendered through their export,
    /// opaque values through their text representation, and documents as
    /// `{"page_content": ..., "metadata": ...}`. Non-finite floats have no JSON
    /// representation and become `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Bytes(b) => JsonValue::String(String::from_utf8_lossy(b).into_owned()),
            Self::Sequence(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Mapping(map) => map.to_json(),
            Self::Document(doc) => doc.to_json(),
            Self::Record(record) => record.export().to_json(),
            Self::Opaque(value) => JsonValue::String(value.to_string()),
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            (Self::Document(a), Self::Document(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b) || a.export() == b.export(),
            (Self::Opaque(a), Self::Opaque(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<JsonValue> for Payload {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or_else(|| Self::Text(n.to_string())),
            JsonValue::String(s) => Self::Text(s),
            JsonValue::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(fields) => Self::Mapping(fields.into_iter().collect()),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Payload {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Payload {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<Vec<Payload>> for Payload {
    fn from(value: Vec<Payload>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Vec<f64>> for Payload {
    fn from(value: Vec<f64>) -> Self {
        Self::Sequence(value.into_iter().map(Self::Float).collect())
    }
}

impl From<Vec<i64>> for Payload {
    fn from(value: Vec<i64>) -> Self {
        Self::Sequence(value.into_iter().map(Self::Int).collect())
    }
}

impl From<PayloadMap> for Payload {
    fn from(value: PayloadMap) -> Self {
        Self::Mapping(value)
    }
}

impl From<Document> for Payload {
    fn from(value: Document) -> Self {
        Self::Document(value)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Insertion-ordered mapping from string keys to payloads.
///
/// Iteration yields entries in insertion order, which is the order the
/// truncation engine keeps when a mapping exceeds its element budget.
/// Re-inserting an existing key replaces the value without moving the entry.
/// Equality compares entries in order.
#[derive(Debug, Clone, Default)]
pub struct PayloadMap {
    entries: IndexMap<String, Payload>,
}

impl PayloadMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Payload>) -> Option<Payload> {
        self.entries.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Payload> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Payload)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Renders the mapping as a JSON object, keeping entry order.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl PartialEq for PayloadMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<Payload>> FromIterator<(K, V)> for PayloadMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for PayloadMap {
    type Item = (String, Payload);
    type IntoIter = indexmap::map::IntoIter<String, Payload>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A retrieved document: text content plus free-form metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub page_content: String,
    pub metadata: PayloadMap,
}

impl Document {
    /// Creates a document with empty metadata.
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: PayloadMap::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: PayloadMap) -> Self {
        self.metadata = metadata;
        self
    }

    /// Renders the document as `{"page_content": ..., "metadata": {...}}`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        serde_json::json!({
            "page_content": self.page_content,
            "metadata": self.metadata.to_json(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl StructuredExport for Point {
        fn export(&self) -> PayloadMap {
            PayloadMap::from_iter([("x", self.x), ("y", self.y)])
        }
    }

    #[test]
    fn test_map_insert_replaces_in_place() {
        let mut map = PayloadMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        let previous = map.insert("a", 3);

        assert_eq!(previous, Some(Payload::Int(1)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Payload::Int(3)));
    }

    #[test]
    fn test_map_equality_is_order_sensitive() {
        let ab = PayloadMap::from_iter([("a", 1), ("b", 2)]);
        let ba = PayloadMap::from_iter([("b", 2), ("a", 1)]);

        assert_eq!(ab, PayloadMap::from_iter([("a", 1), ("b", 2)]));
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_large_json_object_converts_in_order() {
        let count = 100_000;
        let object: serde_json::Map<String, JsonValue> =
            (0..count).map(|i| (format!("key-{i}"), JsonValue::from(i))).collect();

        let payload = Payload::from(JsonValue::Object(object));

        let map = payload.as_mapping().unwrap();
        assert_eq!(map.len(), count);
        assert_eq!(map.keys().next(), Some("key-0"));
        assert_eq!(map.keys().last(), Some("key-99999"));
        assert_eq!(map.get("key-4242"), Some(&Payload::Int(4242)));
    }

    #[test]
    fn test_from_iter_keeps_first_position_of_duplicates() {
        let map = PayloadMap::from_iter([("a", 1), ("b", 2), ("a", 3)]);

        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("a", &Payload::Int(3)), ("b", &Payload::Int(2))]);
    }

    #[test]
    fn test_from_json_preserves_field_order() {
        let value = serde_json::json!({"zeta": 1, "alpha": [1.5, "x"], "mid": null});
        let payload = Payload::from(value);

        let map = payload.as_mapping().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            map.get("alpha"),
            Some(&Payload::Sequence(vec![Payload::Float(1.5), Payload::from("x")]))
        );
        assert!(map.get("mid").unwrap().is_null());
    }

    #[test]
    fn test_from_serialize_struct() {
        #[derive(Serialize)]
        struct Model {
            name: &'static str,
            score: f64,
        }

        let payload = Payload::from_serialize(&Model { name: "m", score: 0.5 }).unwrap();
        let map = payload.as_mapping().unwrap();
        assert_eq!(map.get("name"), Some(&Payload::from("m")));
        assert_eq!(map.get("score"), Some(&Payload::Float(0.5)));
    }

    #[test]
    fn test_to_json_special_shapes() {
        let doc = Document::new("hello").with_metadata(PayloadMap::from_iter([("source", "wiki")]));
        let payload = Payload::Sequence(vec![
            Payload::bytes(b"ab\xffc".to_vec()),
            Payload::Document(doc),
            Payload::record(Point { x: 1, y: 2 }),
            Payload::opaque(42_u8),
            Payload::Float(f64::NAN),
        ]);

        assert_eq!(
            payload.to_json(),
            serde_json::json!([
                "ab\u{fffd}c",
                {"page_content": "hello", "metadata": {"source": "wiki"}},
                {"x": 1, "y": 2},
                "42",
                null
            ])
        );
    }

    #[test]
    fn test_record_equality_uses_export() {
        let a = Payload::record(Point { x: 1, y: 2 });
        let b = Payload::record(Point { x: 1, y: 2 });
        let c = Payload::record(Point { x: 2, y: 2 });

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Payload::Mapping(PayloadMap::from_iter([("x", 1), ("y", 2)])));
    }

    #[test]
    fn test_numeric_excludes_bool() {
        assert!(Payload::Int(1).is_numeric());
        assert!(Payload::Float(0.1).is_numeric());
        assert!(!Payload::Bool(true).is_numeric());
        assert!(!Payload::from("1").is_numeric());
    }
}
