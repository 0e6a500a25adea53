//! Detection of the installed tracing client's API generation.

pub mod detector;

pub use detector::{detect_library_version, detect_version, TracingVersion, SUPPORTED_VERSIONS};
