//! Recursive truncation of traced payloads.
//!
//! [`serialize_for_tracing`] walks a [`Payload`] and returns a new, bounded
//! copy: long text is cut to `max_text_length` characters followed by
//! [`CONTINUATION_MARKER`], and sequences and mappings keep at most
//! `max_container_elements` entries. The input is never modified and the
//! function never fails; values without a dedicated rule degrade to their
//! text representation.
//!
//! # Rules
//!
//! | Input                | Output                                                      |
//! |----------------------|-------------------------------------------------------------|
//! | `Null`               | `Null`                                                      |
//! | `Text`               | truncated text                                              |
//! | `Bytes`              | lossily decoded, then truncated text                        |
//! | `Document`           | content truncated, metadata serialized as a mapping         |
//! | numeric vector       | first `max_container_elements` elements, unchanged          |
//! | other `Sequence`     | first `max_container_elements` elements, each serialized    |
//! | `Record`             | export serialized as a mapping                              |
//! | `Mapping`            | first `max_container_elements` entries, values serialized   |
//! | anything else        | text representation, truncated                              |
//!
//! "Anything else" includes scalar booleans and numbers outside a numeric
//! vector: they are forwarded as text.
//!
//! # Vector Classification
//!
//! A sequence counts as a numeric vector when it is non-empty and its first
//! [`VECTOR_SAMPLE_SIZE`] elements are all integers or floats. Only the sample
//! is inspected, so `[1, 2, 3, "long text"]` is classified as a vector and its
//! tail is kept verbatim. This keeps classification O(1) for embedding-sized
//! vectors.

use std::borrow::Cow;

use crate::domain::{Document, Payload, PayloadMap, TruncationLimits};

/// Suffix appended to truncated text.
pub const CONTINUATION_MARKER: &str = "...";

/// Number of leading elements inspected to classify a numeric vector.
pub const VECTOR_SAMPLE_SIZE: usize = 3;

/// Serializes a payload for tracing, bounding text length and container size.
///
/// # Parameters
///
/// * `value` - Payload to serialize (borrowed, never modified)
/// * `max_text_length` - Maximum number of characters kept from any text
/// * `max_container_elements` - Maximum number of elements kept from any
///   sequence or mapping
///
/// # Examples
///
/// ```
/// use langfuse_runnable_config::{serialize_for_tracing, Payload};
///
/// let long = Payload::from("x".repeat(200));
/// let bounded = serialize_for_tracing(&long, 50, 10);
/// assert_eq!(bounded.as_str().map(str::len), Some(53));
///
/// let vector = Payload::from(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
/// let bounded = serialize_for_tracing(&vector, 50, 3);
/// assert_eq!(bounded, Payload::from(vec![0.1, 0.2, 0.3]));
/// ```
#[must_use]
pub fn serialize_for_tracing(
    value: &Payload,
    max_text_length: usize,
    max_container_elements: usize,
) -> Payload {
    match value {
        Payload::Null => Payload::Null,
        Payload::Text(text) => Payload::Text(truncate_text(text, max_text_length)),
        Payload::Bytes(bytes) => {
            Payload::Text(truncate_text(&String::from_utf8_lossy(bytes), max_text_length))
        }
        Payload::Document(doc) => Payload::Document(serialize_document(
            doc,
            max_text_length,
            max_container_elements,
        )),
        Payload::Sequence(items) => {
            if is_numeric_vector(items) {
                return Payload::Sequence(truncate_vector(items, max_container_elements));
            }
            Payload::Sequence(
                items
                    .iter()
                    .take(max_container_elements)
                    .map(|item| serialize_for_tracing(item, max_text_length, max_container_elements))
                    .collect(),
            )
        }
        Payload::Record(record) => Payload::Mapping(serialize_mapping(
            &record.export(),
            max_text_length,
            max_container_elements,
        )),
        Payload::Mapping(map) => Payload::Mapping(serialize_mapping(
            map,
            max_text_length,
            max_container_elements,
        )),
        Payload::Bool(_) | Payload::Int(_) | Payload::Float(_) | Payload::Opaque(_) => {
            Payload::Text(truncate_text(&text_repr(value), max_text_length))
        }
    }
}

impl TruncationLimits {
    /// Applies [`serialize_for_tracing`] with these limits.
    #[must_use]
    pub fn apply(&self, value: &Payload) -> Payload {
        serialize_for_tracing(value, self.max_text_length(), self.max_container_elements())
    }
}

/// Truncates text to `max_length` characters, appending [`CONTINUATION_MARKER`].
///
/// Length is measured in Unicode scalar values, so a multi-byte character is
/// never split. Text at or under the limit is returned unchanged.
///
/// # Examples
///
/// ```
/// use langfuse_runnable_config::serializers::truncate_text;
///
/// assert_eq!(truncate_text("short", 10), "short");
/// assert_eq!(truncate_text("abcdef", 3), "abc...");
/// assert_eq!(truncate_text("ééééé", 2), "éé...");
/// ```
#[must_use]
pub fn truncate_text(value: &str, max_length: usize) -> String {
    match value.char_indices().nth(max_length) {
        None => value.to_string(),
        Some((cut, _)) => {
            let mut truncated = String::with_capacity(cut + CONTINUATION_MARKER.len());
            truncated.push_str(&value[..cut]);
            truncated.push_str(CONTINUATION_MARKER);
            truncated
        }
    }
}

/// Returns `true` if the sequence looks like a numeric vector.
///
/// Inspects only the first [`VECTOR_SAMPLE_SIZE`] elements. Booleans are not
/// numeric.
#[must_use]
pub fn is_numeric_vector(items: &[Payload]) -> bool {
    !items.is_empty() && items.iter().take(VECTOR_SAMPLE_SIZE).all(Payload::is_numeric)
}

/// Keeps the first `max_elements` elements of a vector, unchanged.
#[must_use]
pub fn truncate_vector(items: &[Payload], max_elements: usize) -> Vec<Payload> {
    items.iter().take(max_elements).cloned().collect()
}

/// Serializes retrieved documents with the sequence rule.
///
/// Documents are never numeric, so this keeps the first
/// `max_container_elements` documents and truncates each one.
#[must_use]
pub fn serialize_documents(documents: &[Document], limits: TruncationLimits) -> Vec<Document> {
    documents
        .iter()
        .take(limits.max_container_elements())
        .map(|doc| serialize_document(doc, limits.max_text_length(), limits.max_container_elements()))
        .collect()
}

fn serialize_document(doc: &Document, max_text_length: usize, max_container_elements: usize) -> Document {
    Document {
        page_content: truncate_text(&doc.page_content, max_text_length),
        metadata: serialize_mapping(&doc.metadata, max_text_length, max_container_elements),
    }
}

fn serialize_mapping(map: &PayloadMap, max_text_length: usize, max_container_elements: usize) -> PayloadMap {
    let mut bounded = PayloadMap::with_capacity(map.len().min(max_container_elements));
    for (key, value) in map.iter().take(max_container_elements) {
        bounded.insert(key, serialize_for_tracing(value, max_text_length, max_container_elements));
    }
    bounded
}

fn text_repr(value: &Payload) -> Cow<'_, str> {
    match value {
        Payload::Bool(b) => Cow::Owned(b.to_string()),
        Payload::Int(i) => Cow::Owned(i.to_string()),
        // Debug keeps the fractional part of integral floats ("1.0", not "1").
        Payload::Float(f) => Cow::Owned(format!("{f:?}")),
        Payload::Opaque(opaque) => Cow::Owned(opaque.to_string()),
        Payload::Text(text) => Cow::Borrowed(text),
        other => Cow::Owned(other.to_json().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Model {
        name: String,
        tags: Vec<String>,
    }

    impl crate::domain::StructuredExport for Model {
        fn export(&self) -> PayloadMap {
            let mut map = PayloadMap::new();
            map.insert("name", self.name.as_str());
            map.insert(
                "tags",
                Payload::Sequence(self.tags.iter().map(|t| Payload::from(t.as_str())).collect()),
            );
            map
        }
    }

    #[test]
    fn test_serialize_null() {
        assert_eq!(serialize_for_tracing(&Payload::Null, 100, 10), Payload::Null);
    }

    #[test]
    fn test_short_string_unchanged() {
        let data = Payload::from("short string");
        assert_eq!(serialize_for_tracing(&data, 100, 10), data);
    }

    #[test]
    fn test_string_at_limit_unchanged() {
        let data = Payload::from("a".repeat(50));
        assert_eq!(serialize_for_tracing(&data, 50, 10), data);
    }

    #[test]
    fn test_long_string_truncated() {
        let data = Payload::from("x".repeat(200));
        let result = serialize_for_tracing(&data, 50, 10);

        let text = result.as_str().unwrap();
        assert_eq!(text.chars().count(), 53);
        assert!(text.starts_with(&"x".repeat(50)));
        assert!(text.ends_with(CONTINUATION_MARKER));
    }

    #[test]
    fn test_multibyte_text_truncated_by_characters() {
        let data = Payload::from("日本語のテキスト");
        let result = serialize_for_tracing(&data, 3, 10);
        assert_eq!(result, Payload::from("日本語..."));
    }

    #[test]
    fn test_vector_truncated() {
        let vector = Payload::from(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]);
        let result = serialize_for_tracing(&vector, 100, 5);
        assert_eq!(result, Payload::from(vec![0.1, 0.2, 0.3, 0.4, 0.5]));
    }

    #[test]
    fn test_short_vector_keeps_numbers() {
        let vector = Payload::from(vec![1_i64, 2, 3]);
        assert_eq!(serialize_for_tracing(&vector, 100, 5), vector);
    }

    #[test]
    fn test_vector_sampling_keeps_unsampled_tail_verbatim() {
        let long_text = "t".repeat(500);
        let data = Payload::Sequence(vec![
            Payload::Int(1),
            Payload::Float(2.0),
            Payload::Int(3),
            Payload::from(long_text.as_str()),
        ]);

        let result = serialize_for_tracing(&data, 10, 10);
        assert_eq!(result, data);
    }

    #[test]
    fn test_bool_sample_is_not_vector() {
        let data = Payload::Sequence(vec![Payload::Int(1), Payload::Bool(true), Payload::Int(3)]);
        let result = serialize_for_tracing(&data, 100, 10);
        assert_eq!(
            result,
            Payload::Sequence(vec![Payload::from("1"), Payload::from("true"), Payload::from("3")])
        );
    }

    #[test]
    fn test_list_truncated() {
        let data = Payload::Sequence(
            ["item1", "item2", "item3", "item4", "item5", "item6"]
                .into_iter()
                .map(Payload::from)
                .collect(),
        );
        let result = serialize_for_tracing(&data, 100, 3);
        assert_eq!(
            result,
            Payload::Sequence(vec!["item1".into(), "item2".into(), "item3".into()])
        );
    }

    #[test]
    fn test_list_elements_serialized_recursively() {
        let data = Payload::Sequence(vec![Payload::from("y".repeat(20)), Payload::Null]);
        let result = serialize_for_tracing(&data, 5, 10);
        assert_eq!(result, Payload::Sequence(vec![Payload::from("yyyyy..."), Payload::Null]));
    }

    #[test]
    fn test_dict_within_limit() {
        let data = Payload::Mapping(PayloadMap::from_iter([
            ("key1", "value1"),
            ("key2", "value2"),
            ("key3", "value3"),
        ]));
        assert_eq!(serialize_for_tracing(&data, 1000, 10), data);
    }

    #[test]
    fn test_large_dict_keeps_first_entries_in_order() {
        let data = Payload::Mapping((0..10).map(|i| (format!("key{i}"), format!("value{i}"))).collect());
        let result = serialize_for_tracing(&data, 1000, 5);

        let map = result.as_mapping().unwrap();
        assert_eq!(map.len(), 5);
        assert_eq!(
            map.keys().collect::<Vec<_>>(),
            vec!["key0", "key1", "key2", "key3", "key4"]
        );
    }

    #[test]
    fn test_scalar_mapping_values_become_text() {
        let data = Payload::Mapping(PayloadMap::from_iter([("a", 1), ("b", 2), ("c", 3)]));
        let result = serialize_for_tracing(&data, 100, 2);
        assert_eq!(
            result,
            Payload::Mapping(PayloadMap::from_iter([("a", "1"), ("b", "2")]))
        );
    }

    #[test]
    fn test_float_text_repr_keeps_fraction() {
        assert_eq!(serialize_for_tracing(&Payload::Float(1.0), 100, 10), Payload::from("1.0"));
    }

    #[test]
    fn test_float_text_repr_exponent_forms() {
        let text = |f: f64| serialize_for_tracing(&Payload::Float(f), 100, 10);

        assert_eq!(text(1e15), Payload::from("1000000000000000.0"));
        assert_eq!(text(1e16), Payload::from("1e16"));
        assert_eq!(text(1e-7), Payload::from("1e-7"));
        assert_eq!(text(0.25), Payload::from("0.25"));
    }

    #[test]
    fn test_document_serialized() {
        let doc = Document::new("test content").with_metadata(PayloadMap::from_iter([("key", "value")]));
        let result = serialize_for_tracing(&Payload::Document(doc.clone()), 100, 10);
        assert_eq!(result, Payload::Document(doc));
    }

    #[test]
    fn test_document_content_and_metadata_bounded() {
        let metadata: PayloadMap = (0..4).map(|i| (format!("m{i}"), "v".repeat(30))).collect();
        let doc = Document::new("c".repeat(30)).with_metadata(metadata);

        let Payload::Document(result) = serialize_for_tracing(&Payload::Document(doc), 10, 2) else {
            panic!("expected a document");
        };
        assert_eq!(result.page_content, format!("{}...", "c".repeat(10)));
        assert_eq!(result.metadata.len(), 2);
        assert_eq!(result.metadata.get("m0"), Some(&Payload::from(format!("{}...", "v".repeat(10)))));
    }

    #[test]
    fn test_bytes_decoded() {
        let result = serialize_for_tracing(&Payload::bytes(b"test bytes".to_vec()), 100, 10);
        assert_eq!(result, Payload::from("test bytes"));
    }

    #[test]
    fn test_invalid_bytes_replaced() {
        let result = serialize_for_tracing(&Payload::bytes(vec![0x66, 0x6f, 0xff, 0x6f]), 100, 10);
        assert_eq!(result, Payload::from("fo\u{fffd}o"));
    }

    #[test]
    fn test_record_exported_once() {
        let model = Model {
            name: "n".repeat(20),
            tags: (0..5).map(|i| format!("tag{i}")).collect(),
        };
        let result = serialize_for_tracing(&Payload::record(model), 4, 2);

        let expected = PayloadMap::from_iter([
            ("name", Payload::from("nnnn...")),
            ("tags", Payload::Sequence(vec!["tag0".into(), "tag1".into()])),
        ]);
        assert_eq!(result, Payload::Mapping(expected));
    }

    #[test]
    fn test_opaque_falls_back_to_text() {
        let result = serialize_for_tracing(&Payload::opaque("q".repeat(8)), 4, 10);
        assert_eq!(result, Payload::from("qqqq..."));
    }

    #[test]
    fn test_input_not_modified() {
        let data = Payload::Sequence(vec![Payload::from("z".repeat(100)); 20]);
        let snapshot = data.clone();
        let _ = serialize_for_tracing(&data, 5, 3);
        assert_eq!(data, snapshot);
    }

    #[test]
    fn test_serialize_documents_bounds_count() {
        let docs: Vec<Document> = (0..4).map(|i| Document::new(format!("document {i}"))).collect();
        let limits = TruncationLimits::new(5, 2).unwrap();

        let result = serialize_documents(&docs, limits);
        assert_eq!(
            result,
            vec![Document::new("docum..."), Document::new("docum...")]
        );
    }

    #[test]
    fn test_empty_sequence_is_not_vector() {
        assert!(!is_numeric_vector(&[]));
        assert_eq!(
            serialize_for_tracing(&Payload::Sequence(vec![]), 10, 10),
            Payload::Sequence(vec![])
        );
    }
}
