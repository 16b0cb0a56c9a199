//! Bootstrap error taxonomy.
//!
//! Transient initialization aborts are the only class recovered without
//! caller involvement; everything else propagates, enriched where the caller
//! would otherwise have to re-derive host state.

use gantry_sdk::{FetchError, FsError, ModuleFault};

use crate::diagnostics::InitReport;

/// Errors raised while obtaining a usable module handle.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The selected binary failed and no further fallback exists.
    #[error("no loadable module; attempted {attempted:?}")]
    Exhausted {
        attempted: Vec<String>,
        #[source]
        source: FetchError,
    },

    #[error("module `{binary}` failed to instantiate")]
    Instantiate {
        binary: String,
        #[source]
        source: FetchError,
    },

    /// The factory resolved but the handle never exposed memory buffers.
    #[error("module `{binary}` instantiated without memory buffers")]
    MemoryAbsent { binary: String },

    #[error("module filesystem setup failed: {0}")]
    Filesystem(#[from] FsError),
}

/// Terminal outcomes of the initialization state machine.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The transient abort persisted past the retry budget.
    #[error("initialization kept aborting through {attempts} attempts ({report})")]
    TransientExhausted { attempts: u32, report: InitReport },

    /// A real fault: never retried.
    #[error("initialization failed on attempt {attempt}: {fault} ({report})")]
    Fatal {
        attempt: u32,
        fault: ModuleFault,
        report: InitReport,
    },
}

/// Everything a bootstrap run can fail with.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("module load failed: {0}")]
    Load(#[from] LoadError),

    /// The host cannot provide the accelerated rendering capability at all.
    #[error("host cannot provide accelerated rendering: {reason}")]
    CapabilityMissing { reason: String },

    /// The surface is absent or not discoverable through the lookup path the
    /// module itself will use.
    #[error("rendering surface `{id}` unavailable: {reason}")]
    SurfaceMissing { id: String, reason: String },

    /// None of the known initialization calling conventions is present.
    #[error("module exposes no supported initialization entry point")]
    UnsupportedModule,

    #[error("initialization failed: {0}")]
    Init(#[from] InitError),
}
