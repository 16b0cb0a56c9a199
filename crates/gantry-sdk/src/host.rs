//! Host environment contract.
//!
//! The host owns the rendering-surface tree and the platform signals the
//! bootstrap core classifies devices by. The core mutates exactly one piece
//! of host state (the output surface element) and probes exactly one host
//! capability (accelerated rendering); everything else is read-only.

/// Element id of the rendering surface.
///
/// The module's internal capability-context creation looks the surface up by
/// this id, so the bootstrap core must prepare the surface under the same id
/// it will be found by later.
pub const OUTPUT_SURFACE_ID: &str = "output-surface";

/// Platform signals used for device classification.
///
/// `shared_memory` reports whether the host supports shared-memory workers;
/// it is logged for diagnosis and never gated on.
#[derive(Debug, Clone)]
pub struct PlatformInfo {
    /// Host platform identifier (user-agent-like free text).
    pub platform: String,
    /// Concurrency hint, if the host exposes one.
    pub concurrency: Option<usize>,
    pub shared_memory: bool,
}

/// Requested geometry for a surface the host is asked to create.
///
/// A created surface must be attached to the live surface tree, must not
/// disturb visible layout, and must not intercept input events.
#[derive(Debug, Clone)]
pub struct SurfaceSpec {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

/// What an id-based surface lookup observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub width: u32,
    pub height: u32,
    /// Whether the element is attached to the live surface tree.
    pub attached: bool,
}

/// Successful acceleration probe result.
#[derive(Debug, Clone)]
pub struct AccelReport {
    /// Backend/version string reported by the throwaway capability context.
    pub backend: String,
}

/// Failure raised by a host operation (surface mutation or capability probe).
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// The host environment the bootstrap runs inside.
pub trait HostEnv {
    fn platform(&self) -> PlatformInfo;

    /// The configuration hint selecting a module variant, if present.
    /// Read once per bootstrap.
    fn variant_hint(&self) -> Option<String>;

    /// Origin plus base path of the running application, without a trailing
    /// slash. Module artifacts resolve relative to this.
    fn base_url(&self) -> String;

    /// Look a surface up by element id.
    ///
    /// This must be the same lookup mechanism the module's native code uses;
    /// a surface reachable only through some other path does not count as
    /// prepared.
    fn lookup_surface(&self, id: &str) -> Option<SurfaceInfo>;

    /// Create and attach a surface matching `spec`.
    fn create_surface(&mut self, spec: &SurfaceSpec) -> Result<(), HostError>;

    /// Assign new dimensions to an existing surface.
    fn resize_surface(&mut self, id: &str, width: u32, height: u32) -> Result<(), HostError>;

    /// Request a capability context from a throwaway surface to verify the
    /// host supports accelerated rendering at all.
    ///
    /// The bootstrap never creates the module's own context; the module does
    /// that internally against the prepared surface. This probe exists only
    /// so an unsupported host fails before any initialization attempt.
    fn probe_acceleration(&mut self) -> Result<AccelReport, HostError>;
}
