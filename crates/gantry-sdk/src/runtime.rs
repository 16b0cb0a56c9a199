//! The loaded-module contract.
//!
//! A [`ModuleRuntime`] is the opaque handle to the instantiated VM module.
//! The bootstrap core confirms its memory buffers, prepares its filesystem,
//! waits for its worker pool, and drives one of its initialization entry
//! conventions; it never executes guest code.

use serde::Serialize;

use crate::device::ImageDevice;
use crate::fs::VirtualFs;

/// Initialization calling conventions a module may expose, in the priority
/// order the bootstrap checks them. Exactly one is used per bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryConvention {
    /// Direct bound entry point on the handle.
    Bound,
    /// Exported low-level entry point.
    Exported,
    /// Generic invocation-by-name mechanism.
    Named,
}

impl EntryConvention {
    pub const PRIORITY: [EntryConvention; 3] = [
        EntryConvention::Bound,
        EntryConvention::Exported,
        EntryConvention::Named,
    ];
}

impl std::fmt::Display for EntryConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntryConvention::Bound => "bound",
            EntryConvention::Exported => "exported",
            EntryConvention::Named => "named",
        };
        f.write_str(name)
    }
}

/// Normal return from the entry point.
///
/// The bound convention is void; a numeric return there means the call went
/// somewhere it should not have. The exported and named conventions return a
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryReturn {
    Unit,
    Code(i64),
}

/// Signal raised by the module during an entry-point call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleFault {
    /// Abrupt unwind with no payload: the call aborted because the runtime
    /// was not ready yet, not because of a genuine fault.
    #[error("abrupt unwind")]
    Unwind,

    /// Numeric fault code (allocation failure, context-creation failure, ...).
    #[error("fault code {0} ({0:#x})")]
    Code(i64),

    /// Structured or assertion-style failure message.
    #[error("{0}")]
    Message(String),
}

/// One entry of the module's background worker readiness list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerState {
    pub loaded: bool,
}

/// The instantiated VM module.
pub trait ModuleRuntime {
    /// Byte length of the module's byte-addressable heap, once its memory
    /// buffers exist. A handle is not valid until this reports a non-zero
    /// length.
    fn heap_len(&self) -> Option<usize>;

    /// The module's virtual filesystem.
    fn fs(&mut self) -> &mut dyn VirtualFs;

    /// Fresh snapshot of the background worker readiness list, or `None` on
    /// runtimes that never populate one.
    fn worker_pool(&self) -> Option<Vec<WorkerState>>;

    fn has_entry(&self, convention: EntryConvention) -> bool;

    /// Invoke the initialization entry point through `convention`.
    ///
    /// The call cannot be interrupted; it returns when the module returns or
    /// raises.
    fn invoke_entry(&mut self, convention: EntryConvention) -> Result<EntryReturn, ModuleFault>;

    /// Store the disc-image device under the runtime's device slot.
    fn attach_image_device(&mut self, device: ImageDevice);
}
