//! Gantry SDK
//!
//! Boundary contracts for the Gantry bootstrap core. The core orchestrates a
//! VM module it never looks inside and a host environment it never owns; both
//! collaborators are reached exclusively through the traits defined here, so
//! embedders (and tests) can substitute either side.
//!
//! - **host**: platform signals, the rendering-surface tree, and the
//!   acceleration capability probe.
//! - **factory**: artifact fetch and module factory instantiation.
//! - **runtime**: the loaded module: memory views, virtual filesystem,
//!   worker pool, and the initialization entry conventions.
//! - **device**: the disc-image device handed to the runtime at bootstrap.

pub mod device;
pub mod factory;
pub mod fs;
pub mod host;
pub mod runtime;

pub use device::ImageDevice;
pub use factory::{ArtifactResolver, FetchError, InstantiateOptions, ModuleFactory, ModuleSource};
pub use fs::{FsError, VirtualFs};
pub use host::{AccelReport, HostEnv, HostError, PlatformInfo, SurfaceInfo, SurfaceSpec};
pub use host::OUTPUT_SURFACE_ID;
pub use runtime::{EntryConvention, EntryReturn, ModuleFault, ModuleRuntime, WorkerState};
