//! Process-wide registry and process environment.
//!
//! Kept in its own test binary, and in a single test, because it mutates
//! global state.

use std::sync::Arc;

use langfuse_runnable_config::client::memory::InMemoryLibrary;
use langfuse_runnable_config::infrastructure::{install_library, installed_library, uninstall_library};
use langfuse_runnable_config::{LangfuseConfig, LangfuseTruncatingConfig};

#[test]
fn test_installed_library_and_process_environment() {
    assert!(installed_library().is_none());
    assert!(LangfuseConfig::new().create_callback(None).is_none());

    std::env::set_var("LANGFUSE_URL", "https://process.example");
    std::env::set_var("LANGFUSE_PUBLIC_KEY", "pk-process");
    std::env::set_var("LANGFUSE_SECRET_KEY", "sk-process");

    let library = Arc::new(InMemoryLibrary::current("3.1.0"));
    assert!(install_library(library.clone()).is_none());

    let config = LangfuseTruncatingConfig::new().create_config(None);
    assert_eq!(config.callbacks.len(), 1);

    assert_eq!(std::env::var("LANGFUSE_BASE_URL").as_deref(), Ok("https://process.example"));
    let handler = library.last_handler().unwrap();
    assert_eq!(handler.credentials().public_key, "pk-process");

    assert!(uninstall_library().is_some());
    assert!(!LangfuseConfig::new().create_config(None).is_enabled());
}
