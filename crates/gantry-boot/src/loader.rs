//! Module loading with default-variant fallback.
//!
//! The selected variant may be absent from a deployment (tier builds trail
//! the default build). That substitution is tolerated exactly once, here, and
//! recorded; every later stage treats the result uniformly.

use tracing::{debug, warn};

use gantry_sdk::{ArtifactResolver, ModuleSource};

use crate::error::LoadError;
use crate::variant::{ModuleVariant, DEFAULT_BINARY};

/// A fetched module factory plus how it was obtained.
#[derive(Debug)]
pub struct LoadedModule<F> {
    pub factory: F,
    /// Binary actually fetched; differs from the request after fallback.
    pub binary_name: &'static str,
    pub fell_back: bool,
}

/// Fetch the factory for `variant`, falling back to the default build if the
/// selected one is unavailable or invalid. Failure of the default is final.
pub async fn load_with_fallback<S>(
    source: &S,
    variant: &ModuleVariant,
    resolver: &ArtifactResolver,
) -> Result<LoadedModule<S::Factory>, LoadError>
where
    S: ModuleSource,
{
    debug!(binary = variant.binary_name, tag = ?variant.tag, "fetching module variant");
    match source.fetch(variant.binary_name, resolver).await {
        Ok(factory) => Ok(LoadedModule {
            factory,
            binary_name: variant.binary_name,
            fell_back: false,
        }),
        Err(primary) if !variant.is_default() => {
            warn!(
                binary = variant.binary_name,
                error = %primary,
                "variant unavailable; falling back to the default build"
            );
            match source.fetch(DEFAULT_BINARY, resolver).await {
                Ok(factory) => Ok(LoadedModule {
                    factory,
                    binary_name: DEFAULT_BINARY,
                    fell_back: true,
                }),
                Err(source) => Err(LoadError::Exhausted {
                    attempted: vec![variant.binary_name.to_string(), DEFAULT_BINARY.to_string()],
                    source,
                }),
            }
        }
        Err(source) => Err(LoadError::Exhausted {
            attempted: vec![variant.binary_name.to_string()],
            source,
        }),
    }
}
