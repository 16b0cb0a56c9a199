//! Module virtual-filesystem capability.
//!
//! The bootstrap needs exactly one filesystem operation: creating the staging
//! directory disc images are mounted under.

#[derive(Debug, Clone, thiserror::Error)]
pub enum FsError {
    #[error("path `{0}` already exists")]
    AlreadyExists(String),

    #[error("filesystem operation failed: {0}")]
    Other(String),
}

/// Filesystem surface of the module runtime.
pub trait VirtualFs {
    fn mkdir(&mut self, path: &str) -> Result<(), FsError>;
}
