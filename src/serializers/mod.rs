//! Payload serialization for tracing.
//!
//! - `truncator`: recursive truncation engine bounding text length and
//!   container size before payloads reach a tracing client

pub mod truncator;

pub use truncator::{
    is_numeric_vector, serialize_documents, serialize_for_tracing, truncate_text, truncate_vector,
    CONTINUATION_MARKER, VECTOR_SAMPLE_SIZE,
};
