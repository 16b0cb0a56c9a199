//! Gantry bootstrap core
//!
//! Prepares a host-embedded environment to run a memory-tiered VM module and
//! hands control to it: resolves the binary variant for the device's memory
//! budget, loads it (falling back to the default build when a tier is
//! unavailable), verifies the host can satisfy the module's rendering
//! requirements, waits for the module's background workers, and drives the
//! initialization entry point with a bounded, device-class-aware retry
//! policy.
//!
//! # Example
//!
//! ```rust,ignore
//! use gantry_boot::{bootstrap, BootOptions};
//!
//! let options = BootOptions::default();
//! let handle = bootstrap(&mut host, &artifacts, &options).await?;
//! let runtime = handle.into_runtime();
//! ```

pub mod bootstrap;
pub mod device;
pub mod diagnostics;
pub mod error;
pub mod init;
pub mod loader;
pub mod options;
pub mod readiness;
pub mod surface;
pub mod variant;

pub use bootstrap::{bootstrap, VmHandle};
pub use device::DeviceClass;
pub use diagnostics::InitReport;
pub use error::{BootError, InitError, LoadError};
pub use init::{InitState, VmInitializer};
pub use options::BootOptions;
pub use surface::RenderingSurface;
pub use variant::{ModuleVariant, VariantTag, DEFAULT_BINARY};
