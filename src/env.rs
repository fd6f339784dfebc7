//! Environment resolution for import variables
//!
//! Provides trait-based access to the build environment, enabling dependency
//! injection and mocking for tests. The compiler treats resolver reads as a
//! point-in-time snapshot; missing values resolve to an empty string at the
//! call site, never to an error.

/// Trait for resolving environment values by name
///
/// This abstracts reading from process environment variables, enabling
/// proper unit testing without manipulating global state.
#[cfg_attr(test, mockall::automock)]
pub trait EnvResolver: Send + Sync {
    /// Look up the value for `name`, or None when unset
    fn resolve(&self, name: &str) -> Option<String>;
}

/// Default implementation that reads from process environment variables
#[derive(Clone, Default)]
pub struct OsEnv;

impl EnvResolver for OsEnv {
    fn resolve(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
