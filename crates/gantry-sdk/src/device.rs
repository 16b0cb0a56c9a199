//! Disc-image device boundary.
//!
//! The bootstrap constructs exactly one device per run and hands it to the
//! runtime; the device's own operations (mounting, swapping, ejecting images)
//! are out of scope here and borrow the runtime at their call sites.

/// Disc-image device attached to the module runtime during bootstrap.
#[derive(Debug, Clone)]
pub struct ImageDevice {
    work_dir: String,
}

impl ImageDevice {
    /// Create a device staging images under `work_dir` on the module
    /// filesystem. The directory must exist before the device is used.
    pub fn new(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &str {
        &self.work_dir
    }
}
