//! Failure diagnostics.
//!
//! A failed initialization should let the caller tell a surface problem from
//! a capability problem from an unknown module fault without re-deriving host
//! state. [`describe`] assembles that context as a plain value; it never
//! replaces the original fault, which travels alongside it in the error.

use serde::Serialize;

use gantry_sdk::{EntryConvention, HostEnv, ModuleRuntime};

use crate::options::BootOptions;

/// Host and module state captured at the moment initialization failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
    /// Calling convention used for the failed attempt(s).
    pub convention: EntryConvention,
    pub surface_present: bool,
    pub surface_attached: bool,
    pub surface_width: u32,
    pub surface_height: u32,
    pub heap_present: bool,
}

/// Capture the diagnostic context for a failed initialization.
pub fn describe<H, R>(
    env: &H,
    runtime: &R,
    options: &BootOptions,
    convention: EntryConvention,
) -> InitReport
where
    H: HostEnv,
    R: ModuleRuntime,
{
    let surface = env.lookup_surface(&options.surface_id);
    InitReport {
        convention,
        surface_present: surface.is_some(),
        surface_attached: surface.is_some_and(|s| s.attached),
        surface_width: surface.map_or(0, |s| s.width),
        surface_height: surface.map_or(0, |s| s.height),
        heap_present: runtime.heap_len().is_some_and(|len| len > 0),
    }
}

impl std::fmt::Display for InitReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "convention={}, surface=", self.convention)?;
        if self.surface_present {
            write!(f, "{}x{}", self.surface_width, self.surface_height)?;
            if !self.surface_attached {
                write!(f, " detached")?;
            }
        } else {
            write!(f, "absent")?;
        }
        write!(
            f,
            ", heap={}",
            if self.heap_present { "present" } else { "missing" }
        )
    }
}
