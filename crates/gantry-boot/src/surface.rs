//! Rendering-surface preparation.
//!
//! The module creates its own capability context against a surface it looks
//! up by id. This stage guarantees that lookup will find an attached,
//! non-zero surface, and that the host can produce an accelerated context at
//! all. It never creates the module's own context.

use tracing::{debug, info, warn};

use gantry_sdk::{HostEnv, SurfaceSpec};

use crate::error::BootError;
use crate::options::BootOptions;

/// A prepared, verified rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderingSurface {
    pub element_id: String,
    pub width: u32,
    pub height: u32,
    pub attached: bool,
}

/// Guarantee a valid output surface exists and the host supports accelerated
/// rendering. Idempotent: an already-prepared surface is adopted as-is.
pub fn ensure_surface<H>(env: &mut H, options: &BootOptions) -> Result<RenderingSurface, BootError>
where
    H: HostEnv,
{
    let id = options.surface_id.as_str();
    match env.lookup_surface(id) {
        Some(info) if info.width == 0 || info.height == 0 => {
            // Context creation needs non-zero dimensions on some hosts.
            debug!(
                id,
                width = options.surface_default_width,
                height = options.surface_default_height,
                "surface has zero dimensions; assigning defaults"
            );
            env.resize_surface(id, options.surface_default_width, options.surface_default_height)
                .map_err(|e| surface_missing(id, e.to_string()))?;
        }
        Some(_) => {}
        None => {
            warn!(id, "output surface not found; creating it");
            let spec = SurfaceSpec {
                id: id.to_string(),
                width: options.surface_default_width,
                height: options.surface_default_height,
            };
            env.create_surface(&spec)
                .map_err(|e| surface_missing(id, e.to_string()))?;
        }
    }

    let accel = env
        .probe_acceleration()
        .map_err(|e| BootError::CapabilityMissing {
            reason: e.to_string(),
        })?;
    info!(backend = %accel.backend, "accelerated rendering verified");

    // Re-verify through the same lookup the module's native call will use; a
    // surface reachable only through some other path must fail loudly here.
    let info = env.lookup_surface(id).ok_or_else(|| {
        surface_missing(id, "not discoverable by id lookup after preparation".to_string())
    })?;
    if !info.attached {
        return Err(surface_missing(
            id,
            "not attached to the live surface tree".to_string(),
        ));
    }
    if info.width == 0 || info.height == 0 {
        return Err(surface_missing(
            id,
            format!("zero-sized after preparation ({}x{})", info.width, info.height),
        ));
    }

    debug!(id, width = info.width, height = info.height, "surface ready");
    Ok(RenderingSurface {
        element_id: id.to_string(),
        width: info.width,
        height: info.height,
        attached: info.attached,
    })
}

fn surface_missing(id: &str, reason: String) -> BootError {
    BootError::SurfaceMissing {
        id: id.to_string(),
        reason,
    }
}
