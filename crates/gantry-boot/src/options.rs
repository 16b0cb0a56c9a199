//! Bootstrap configuration.
//!
//! Every tunable the bootstrap consults lives here. The retry and settle
//! numbers are policy, not contract: the defaults reproduce the reference
//! behavior, and embedders with better telemetry can resize them.

use std::time::Duration;

use gantry_sdk::OUTPUT_SURFACE_ID;

use crate::device::DeviceClass;

/// Options controlling a bootstrap run.
#[derive(Debug, Clone)]
pub struct BootOptions {
    /// Element id the output surface is prepared (and later found) under.
    pub surface_id: String,
    /// Dimensions assigned when the surface is created or has zero size.
    pub surface_default_width: u32,
    pub surface_default_height: u32,

    /// Staging directory created on the module filesystem after load.
    pub work_dir: String,

    /// Settle delay after instantiation, before the worker poll.
    pub settle_delay_standard: Duration,
    pub settle_delay_constrained: Duration,
    /// Interval between worker-pool readiness snapshots.
    pub worker_poll_interval: Duration,
    /// Upper bound on the worker wait; exceeding it is logged, not fatal.
    pub worker_wait_ceiling: Duration,

    /// Delay between initialization attempts.
    pub retry_delay: Duration,
    /// Retries allowed after the first attempt, per device class.
    pub max_retries_standard: u32,
    pub max_retries_constrained: u32,
}

impl Default for BootOptions {
    fn default() -> Self {
        Self {
            surface_id: OUTPUT_SURFACE_ID.to_string(),
            surface_default_width: 480,
            surface_default_height: 360,
            work_dir: "/work".to_string(),
            settle_delay_standard: Duration::from_millis(500),
            settle_delay_constrained: Duration::from_millis(1500),
            worker_poll_interval: Duration::from_millis(100),
            worker_wait_ceiling: Duration::from_millis(3000),
            retry_delay: Duration::from_millis(1000),
            max_retries_standard: 1,
            max_retries_constrained: 3,
        }
    }
}

impl BootOptions {
    pub fn settle_delay(&self, class: DeviceClass) -> Duration {
        match class {
            DeviceClass::Constrained => self.settle_delay_constrained,
            DeviceClass::Standard => self.settle_delay_standard,
        }
    }

    pub fn max_retries(&self, class: DeviceClass) -> u32 {
        match class {
            DeviceClass::Constrained => self.max_retries_constrained,
            DeviceClass::Standard => self.max_retries_standard,
        }
    }
}
