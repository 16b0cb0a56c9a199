//! Device classification.
//!
//! Worker-thread startup is markedly slower on constrained devices, so the
//! settle and retry policy is sized by a coarse classification made once per
//! bootstrap from host platform signals.

use gantry_sdk::PlatformInfo;

/// Coarse host constrainedness. Immutable for a bootstrap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Constrained,
    Standard,
}

/// Platform identifiers observed to need the longer startup budget.
const CONSTRAINED_MARKERS: [&str; 3] = ["iPad", "iPhone", "iPod"];

/// At or below this many cores the device gets the constrained budget.
const CONSTRAINED_MAX_CORES: usize = 4;

/// Classify the host from its platform identifier and concurrency hint.
///
/// Hosts that expose no concurrency hint are measured locally.
pub fn classify(platform: &PlatformInfo) -> DeviceClass {
    let marked = CONSTRAINED_MARKERS
        .iter()
        .any(|marker| platform.platform.contains(marker));
    let cores = platform.concurrency.unwrap_or_else(num_cpus::get);
    if marked || cores <= CONSTRAINED_MAX_CORES {
        DeviceClass::Constrained
    } else {
        DeviceClass::Standard
    }
}
