//! Module artifact loading and instantiation.
//!
//! A [`ModuleSource`] maps a binary name to a [`ModuleFactory`]; the factory
//! instantiates the runtime. Fetch failures are recoverable at the loader
//! level (fallback to the default variant); instantiation failures are not.

use async_trait::async_trait;

use crate::runtime::ModuleRuntime;

/// Resolves artifact file names against the application base path.
///
/// Produces `base + "/" + file_name`, matching the lookup the module runtime
/// itself performs for its side files.
#[derive(Debug, Clone)]
pub struct ArtifactResolver {
    base: String,
}

impl ArtifactResolver {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn resolve(&self, file_name: &str) -> String {
        format!("{}/{}", self.base, file_name)
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

/// Options handed to a module factory at instantiation.
#[derive(Debug, Clone)]
pub struct InstantiateOptions {
    /// Resolver the runtime uses to locate its side artifacts.
    pub locate: ArtifactResolver,
    /// Resolved URL of the main module artifact being instantiated.
    pub main_artifact_url: String,
}

/// Failure to turn a binary name into a usable module factory or runtime.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("module artifact `{0}` not found")]
    NotFound(String),

    /// The artifact loaded but did not resolve to a callable factory.
    #[error("artifact `{0}` is not a callable module factory")]
    NotCallable(String),

    #[error("host failed loading `{name}`: {reason}")]
    Host { name: String, reason: String },
}

/// Source of module artifacts (the host's dynamic-load mechanism).
#[async_trait(?Send)]
pub trait ModuleSource {
    type Factory: ModuleFactory;

    /// Fetch the factory for `binary_name`, resolving it through `resolver`.
    async fn fetch(
        &self,
        binary_name: &str,
        resolver: &ArtifactResolver,
    ) -> Result<Self::Factory, FetchError>;
}

/// A fetched module implementation, ready to instantiate.
#[async_trait(?Send)]
pub trait ModuleFactory {
    type Runtime: ModuleRuntime;

    async fn instantiate(&self, options: InstantiateOptions)
        -> Result<Self::Runtime, FetchError>;
}
