//! The bootstrap sequence.
//!
//! Strictly sequential: classify → resolve variant → load (with fallback) →
//! memory check → filesystem and device setup → surface preparation →
//! readiness wait → initialization. The only suspension points are artifact
//! loading, instantiation, and the delays; nothing runs concurrently with
//! anything else, and there is no abort handle. The sequence runs to a
//! handle or to an error.

use tracing::{debug, info};

use gantry_sdk::{
    ArtifactResolver, HostEnv, ImageDevice, InstantiateOptions, ModuleFactory, ModuleRuntime,
    ModuleSource,
};

use crate::device::{self, DeviceClass};
use crate::error::{BootError, LoadError};
use crate::init::VmInitializer;
use crate::loader;
use crate::options::BootOptions;
use crate::readiness;
use crate::surface::{self, RenderingSurface};
use crate::variant::{self, VariantTag};

type RuntimeOf<S> = <<S as ModuleSource>::Factory as ModuleFactory>::Runtime;

/// The fully initialized module, exclusively owned by the caller.
///
/// The bootstrap is the handle's only writer; from here on it is the caller's
/// long-lived root of the running VM.
#[derive(Debug)]
pub struct VmHandle<R> {
    runtime: R,
    surface: RenderingSurface,
    requested_tag: Option<VariantTag>,
    binary_name: &'static str,
    fell_back: bool,
    device_class: DeviceClass,
}

impl<R> VmHandle<R> {
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn into_runtime(self) -> R {
        self.runtime
    }

    pub fn surface(&self) -> &RenderingSurface {
        &self.surface
    }

    /// Tag originally requested by the configuration hint; `None` when the
    /// default build was requested.
    pub fn requested_tag(&self) -> Option<VariantTag> {
        self.requested_tag
    }

    /// Binary actually loaded (the default build after a fallback).
    pub fn binary_name(&self) -> &'static str {
        self.binary_name
    }

    /// Whether the loader substituted the default build for the request.
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }
}

/// Prepare the host, load the right module variant, and drive its
/// initialization entry point. Returns the initialized handle or the first
/// fatal error; there is no partial success.
pub async fn bootstrap<H, S>(
    env: &mut H,
    source: &S,
    options: &BootOptions,
) -> Result<VmHandle<RuntimeOf<S>>, BootError>
where
    H: HostEnv,
    S: ModuleSource,
{
    let platform = env.platform();
    info!(
        platform = %platform.platform,
        concurrency = ?platform.concurrency,
        shared_memory = platform.shared_memory,
        "bootstrap starting"
    );
    let class = device::classify(&platform);

    let hint = env.variant_hint();
    let variant = variant::resolve(hint.as_deref());
    debug!(hint = ?hint, binary = variant.binary_name, "module variant resolved");

    let resolver = ArtifactResolver::new(env.base_url());
    let loaded = loader::load_with_fallback(source, &variant, &resolver).await?;

    let main_artifact_url = resolver.resolve(loaded.binary_name);
    let mut runtime = loaded
        .factory
        .instantiate(InstantiateOptions {
            locate: resolver,
            main_artifact_url,
        })
        .await
        .map_err(|source| LoadError::Instantiate {
            binary: loaded.binary_name.to_string(),
            source,
        })?;

    // The handle is not valid until its memory buffers exist.
    let heap_len = runtime
        .heap_len()
        .filter(|len| *len > 0)
        .ok_or_else(|| LoadError::MemoryAbsent {
            binary: loaded.binary_name.to_string(),
        })?;
    debug!(heap_bytes = heap_len, "module memory confirmed");

    runtime
        .fs()
        .mkdir(&options.work_dir)
        .map_err(LoadError::Filesystem)?;
    runtime.attach_image_device(ImageDevice::new(&options.work_dir));

    let surface = surface::ensure_surface(env, options)?;

    readiness::wait_for_workers(&runtime, class, options).await;

    let mut initializer = VmInitializer::select(&runtime, class, options)?;
    initializer.run(&mut runtime, env, options).await?;

    info!(
        binary = loaded.binary_name,
        fell_back = loaded.fell_back,
        "module initialized and handed over"
    );
    Ok(VmHandle {
        runtime,
        surface,
        requested_tag: variant.tag,
        binary_name: loaded.binary_name,
        fell_back: loaded.fell_back,
        device_class: class,
    })
}
