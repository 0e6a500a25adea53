//! Handler construction and composition.
//!
//! - [`factory`]: detect the client version, select a strategy, build
//! - [`truncating`]: the truncation decorator wrapped around built handlers

pub mod factory;
pub mod truncating;

pub use factory::{create_config, create_handler, create_truncating_config, create_truncating_handler};
pub use truncating::TruncatingHandler;
