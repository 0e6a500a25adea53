//! Infrastructure layer for process-wide state.
//!
//! This module isolates the two pieces of global state the crate touches: the
//! environment variables current-generation clients read their credentials
//! from, and the registry holding the installed tracing library. Both are
//! reached through traits so they can be swapped for isolated versions.
//!
//! - [`env`]: environment access and the variable names written for clients
//! - [`registry`]: installed-library registry and locators
//! - [`context`]: the bundle of both handed to strategies

pub mod context;
pub mod env;
pub mod registry;

pub use context::BuildContext;
pub use env::{Environment, MemoryEnvironment, ProcessEnvironment, BASE_URL_VAR, PUBLIC_KEY_VAR, SECRET_KEY_VAR};
pub use registry::{
    install_library, installed_library, uninstall_library, FixedLocator, InstalledLibrary, LibraryLocator,
};
